//! # Passforge Core
//!
//! Credential generation, strength analysis and an encrypted generation
//! history for a single local user.
//!
//! ## Features
//!
//! - Random passwords with guaranteed character-class coverage
//! - Memorable passphrases from an immutable shared wordlist
//! - Numeric PINs with optional grouping
//! - Entropy, pattern and dictionary based strength analysis
//! - AES-256-GCM encrypted history keyed by PBKDF2-HMAC-SHA-256
//!
//! ## Example
//!
//! ```no_run
//! use passforge::{CharacterClass, HistoryEntry, HistoryStore, RandomGenerator, analyze_password};
//! use std::path::Path;
//!
//! let generator = RandomGenerator::new(16, &CharacterClass::ALL[..4]);
//! let password = generator.generate().unwrap();
//!
//! let analysis = analyze_password(&password);
//! println!("{} ({:.1} bits)", analysis.level, analysis.entropy);
//!
//! let store = HistoryStore::in_folder(Path::new("/path/to/config"), 100)
//!     .with_passphrase("my history passphrase");
//! let entry = HistoryEntry::from_generation(
//!     passforge::GeneratorKind::Random,
//!     &password,
//!     &generator.settings_summary(),
//! );
//! store.add_entry(entry).unwrap();
//! ```

pub mod analyzer;
pub mod config;
pub mod crypto;
pub mod error;
pub mod generator;
pub mod history;
pub mod random;
pub mod utils;
pub mod wordlist;

// Re-export main types
pub use analyzer::{SecurityAnalysis, SecurityAnalyzer, StrengthLevel, analyze_password, validate_password_strength};
pub use config::Settings;
pub use error::{ForgeError, Result};
pub use generator::{
    CharacterClass, CharacterSetBuilder, Generator, GeneratorConfig, GeneratorKind, MemorableGenerator,
    PinGenerator, RandomGenerator, format_pin,
};
pub use history::{HistoryEntry, HistoryStore};
pub use random::{CancelToken, OsRandom, RandomSource};
pub use wordlist::Wordlist;

/// Minimum random password length
pub const RANDOM_MIN_LENGTH: usize = 1;

/// Maximum random password length
pub const RANDOM_MAX_LENGTH: usize = 1024;

/// Minimum passphrase word count
pub const MEMORABLE_MIN_WORDS: usize = 1;

/// Maximum passphrase word count
pub const MEMORABLE_MAX_WORDS: usize = 20;

/// Smallest wordlist accepted for passphrase generation
pub const MIN_WORDLIST_SIZE: usize = 100;

/// Minimum PIN length
pub const PIN_MIN_LENGTH: usize = 1;

/// Maximum PIN length
pub const PIN_MAX_LENGTH: usize = 50;

/// PBKDF2-HMAC-SHA-256 iteration count for history keys
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// AES-256 key length in bytes
pub const KEY_LENGTH: usize = 32;

/// PBKDF2 salt length in bytes
pub const SALT_SIZE: usize = 16;

/// AES-GCM nonce length in bytes
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_SIZE: usize = 16;

/// Default history cap
pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 100;

/// History filename
pub const HISTORY_FILENAME: &str = "history.enc";
