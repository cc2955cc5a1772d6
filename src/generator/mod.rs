//! Credential generators
//!
//! Three generators share one behavioural contract (`generate`,
//! `estimate_entropy`, `validate`, `name`): [`RandomGenerator`],
//! [`MemorableGenerator`] and [`PinGenerator`]. [`Generator`] is the closed
//! set of the three for callers that pick one at runtime.
//!
//! All generators validate their configuration before the first random draw
//! and check the [`CancelToken`] between draws. Sensitive intermediate buffers
//! are zeroed on every exit path. The returned `String` itself is a normal
//! heap allocation; scrubbing copies made after it is handed out is up to the
//! caller.

pub mod charset;
mod memorable;
mod pin;
mod random;

pub use charset::{CharacterClass, CharacterSetBuilder};
pub use memorable::MemorableGenerator;
pub use pin::{PinGenerator, format_pin};
pub use random::RandomGenerator;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::random::{CancelToken, OsRandom, RandomSource};
use crate::wordlist::Wordlist;

/// Per-call generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Password or PIN length
    pub length: usize,
    /// Character classes for random passwords
    pub classes: Vec<CharacterClass>,
    /// Characters that must never appear
    pub exclude: String,
    /// Number of words for passphrases
    pub word_count: usize,
    /// Passphrase word separator
    pub separator: String,
    /// Capitalize passphrase words
    pub capitalize: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 16,
            classes: vec![
                CharacterClass::Lowercase,
                CharacterClass::Uppercase,
                CharacterClass::Digit,
            ],
            exclude: String::new(),
            word_count: 4,
            separator: "-".to_string(),
            capitalize: false,
        }
    }
}

/// Which generator produced a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    Random,
    Memorable,
    Pin,
}

impl GeneratorKind {
    /// Human-readable generator name
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Random => "Random Password",
            GeneratorKind::Memorable => "Memorable Passphrase",
            GeneratorKind::Pin => "Numeric PIN",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three generators
#[derive(Debug, Clone)]
pub enum Generator {
    Random(RandomGenerator),
    Memorable(MemorableGenerator),
    Pin(PinGenerator),
}

impl Generator {
    /// Build the generator of `kind` from a shared config.
    ///
    /// The wordlist is only used by the memorable generator.
    pub fn from_config(kind: GeneratorKind, config: &GeneratorConfig, wordlist: &Wordlist) -> Self {
        match kind {
            GeneratorKind::Random => Generator::Random(RandomGenerator::from_config(config)),
            GeneratorKind::Memorable => {
                Generator::Memorable(MemorableGenerator::from_config(config, wordlist.clone()))
            }
            GeneratorKind::Pin => Generator::Pin(PinGenerator::from_config(config)),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Random(_) => GeneratorKind::Random,
            Generator::Memorable(_) => GeneratorKind::Memorable,
            Generator::Pin(_) => GeneratorKind::Pin,
        }
    }

    /// Generate with the OS random source and no deadline
    pub fn generate(&self) -> Result<String> {
        self.generate_with(&OsRandom, &CancelToken::new())
    }

    /// Generate with an explicit random source and cancellation token
    pub fn generate_with(&self, source: &dyn RandomSource, cancel: &CancelToken) -> Result<String> {
        match self {
            Generator::Random(g) => g.generate_with(source, cancel),
            Generator::Memorable(g) => g.generate_with(source, cancel),
            Generator::Pin(g) => g.generate_with(source, cancel),
        }
    }

    /// Theoretical entropy in bits for the current configuration
    pub fn estimate_entropy(&self) -> f64 {
        match self {
            Generator::Random(g) => g.estimate_entropy(),
            Generator::Memorable(g) => g.estimate_entropy(),
            Generator::Pin(g) => g.estimate_entropy(),
        }
    }

    /// Check the wrapped generator's configuration without drawing randomness
    pub fn validate(&self) -> Result<()> {
        match self {
            Generator::Random(g) => g.validate(),
            Generator::Memorable(g) => g.validate(),
            Generator::Pin(g) => g.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Short description of the settings, suitable for history entries
    pub fn settings_summary(&self) -> String {
        match self {
            Generator::Random(g) => g.settings_summary(),
            Generator::Memorable(g) => g.settings_summary(),
            Generator::Pin(g) => g.settings_summary(),
        }
    }
}

impl From<RandomGenerator> for Generator {
    fn from(g: RandomGenerator) -> Self {
        Generator::Random(g)
    }
}

impl From<MemorableGenerator> for Generator {
    fn from(g: MemorableGenerator) -> Self {
        Generator::Memorable(g)
    }
}

impl From<PinGenerator> for Generator {
    fn from(g: PinGenerator) -> Self {
        Generator::Pin(g)
    }
}

/// log2 that treats non-positive input as zero entropy
pub(crate) fn log2(x: f64) -> f64 {
    if x <= 0.0 { 0.0 } else { x.log2() }
}

/// Fisher-Yates shuffle driven by the random source
pub(crate) fn shuffle<T>(items: &mut [T], source: &dyn RandomSource, cancel: &CancelToken) -> Result<()> {
    for i in (1..items.len()).rev() {
        cancel.check()?;
        let j = source.uniform(i + 1)?;
        items.swap(i, j);
    }
    Ok(())
}
