//! User settings handed to the core
//!
//! [`Settings`] is a plain JSON document. Generation defaults are stored
//! under `default_*` keys (`default_include_symbols`, `default_pin_length`,
//! ...); the short field names are accepted when reading. Unknown fields are
//! ignored and missing fields take their defaults, so files written by older
//! versions keep loading. Out-of-range values are clamped by
//! [`Settings::validate`] rather than rejected.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};
use crate::generator::charset::{AMBIGUOUS, SIMILAR};
use crate::generator::{CharacterClass, GeneratorConfig};
use crate::history::HistoryStore;
use crate::wordlist::Wordlist;
use crate::{DEFAULT_HISTORY_MAX_ENTRIES, HISTORY_FILENAME};

/// Settings file name inside the config directory
pub const SETTINGS_FILENAME: &str = "config.json";

/// Directory name under the platform config directory
pub const APP_DIR_NAME: &str = "passforge";

const DEFAULT_LENGTH: usize = 12;
const MAX_DEFAULT_LENGTH: usize = 512;
const DEFAULT_WORDS: usize = 4;
const MAX_WORDS: usize = 20;
const DEFAULT_PIN_LENGTH: usize = 4;
const MAX_PIN_LENGTH: usize = 50;
const MAX_HISTORY_ENTRIES: usize = 10_000;

/// Generation defaults and history preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_length: usize,
    #[serde(rename = "default_include_lowercase", alias = "include_lowercase")]
    pub include_lowercase: bool,
    #[serde(rename = "default_include_uppercase", alias = "include_uppercase")]
    pub include_uppercase: bool,
    #[serde(rename = "default_include_numbers", alias = "include_numbers")]
    pub include_numbers: bool,
    #[serde(rename = "default_include_symbols", alias = "include_symbols")]
    pub include_symbols: bool,
    /// Drop `il1Lo0O`
    #[serde(rename = "default_exclude_similar", alias = "exclude_similar")]
    pub exclude_similar: bool,
    /// Drop `0O1lI`
    #[serde(rename = "default_exclude_ambiguous", alias = "exclude_ambiguous")]
    pub exclude_ambiguous: bool,

    #[serde(rename = "default_passphrase_words", alias = "passphrase_words")]
    pub passphrase_words: usize,
    #[serde(rename = "default_passphrase_separator", alias = "passphrase_separator")]
    pub passphrase_separator: String,
    #[serde(rename = "default_passphrase_capitalize", alias = "passphrase_capitalize")]
    pub passphrase_capitalize: bool,
    /// Custom wordlist; the embedded list is used when unset
    pub wordlist_path: Option<PathBuf>,

    #[serde(rename = "default_pin_length", alias = "pin_length")]
    pub pin_length: usize,

    pub history_enabled: bool,
    pub history_max_entries: usize,
    /// History file; `<config dir>/history.enc` when unset
    pub history_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_LENGTH,
            include_lowercase: true,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: false,
            exclude_similar: false,
            exclude_ambiguous: false,
            passphrase_words: DEFAULT_WORDS,
            passphrase_separator: "-".to_string(),
            passphrase_capitalize: false,
            wordlist_path: None,
            pin_length: DEFAULT_PIN_LENGTH,
            history_enabled: true,
            history_max_entries: DEFAULT_HISTORY_MAX_ENTRIES,
            history_path: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and clamp them
    pub fn from_json(json: &str) -> Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from `path`; an absent file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => {
                debug!("Loading settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Clamp out-of-range values back to sane defaults
    pub fn validate(&mut self) {
        if !(1..=MAX_DEFAULT_LENGTH).contains(&self.default_length) {
            warn!("default_length {} out of range, using {}", self.default_length, DEFAULT_LENGTH);
            self.default_length = DEFAULT_LENGTH;
        }
        if !(1..=MAX_WORDS).contains(&self.passphrase_words) {
            warn!("passphrase_words {} out of range, using {}", self.passphrase_words, DEFAULT_WORDS);
            self.passphrase_words = DEFAULT_WORDS;
        }
        if !(1..=MAX_PIN_LENGTH).contains(&self.pin_length) {
            warn!("pin_length {} out of range, using {}", self.pin_length, DEFAULT_PIN_LENGTH);
            self.pin_length = DEFAULT_PIN_LENGTH;
        }
        if self.passphrase_separator.is_empty() {
            self.passphrase_separator = "-".to_string();
        }
        if self.history_max_entries < 1 {
            self.history_max_entries = DEFAULT_HISTORY_MAX_ENTRIES;
        } else if self.history_max_entries > MAX_HISTORY_ENTRIES {
            self.history_max_entries = MAX_HISTORY_ENTRIES;
        }
    }

    /// Selected character classes, in canonical order
    pub fn classes(&self) -> Vec<CharacterClass> {
        [
            (self.include_lowercase, CharacterClass::Lowercase),
            (self.include_uppercase, CharacterClass::Uppercase),
            (self.include_numbers, CharacterClass::Digit),
            (self.include_symbols, CharacterClass::Symbol),
        ]
        .into_iter()
        .filter_map(|(on, class)| on.then_some(class))
        .collect()
    }

    /// Generator settings for one call.
    ///
    /// The same length feeds both random passwords and PINs, so the PIN
    /// length is applied by [`Settings::pin_config`].
    pub fn generator_config(&self) -> GeneratorConfig {
        let mut exclude = String::new();
        if self.exclude_similar {
            exclude.push_str(SIMILAR);
        }
        if self.exclude_ambiguous {
            exclude.push_str(AMBIGUOUS);
        }

        GeneratorConfig {
            length: self.default_length,
            classes: self.classes(),
            exclude,
            word_count: self.passphrase_words,
            separator: self.passphrase_separator.clone(),
            capitalize: self.passphrase_capitalize,
        }
    }

    /// Generator settings with the PIN length applied
    pub fn pin_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            length: self.pin_length,
            ..self.generator_config()
        }
    }

    /// The configured wordlist, or the embedded one
    pub fn wordlist(&self) -> Result<Wordlist> {
        match &self.wordlist_path {
            Some(path) => Wordlist::from_path(path),
            None => Ok(Wordlist::embedded()),
        }
    }

    /// History store for these settings; the caller still sets the passphrase.
    ///
    /// `config_dir` locates the default history file when no explicit path is
    /// configured.
    pub fn history_store(&self, config_dir: &Path) -> HistoryStore {
        let path = self
            .history_path
            .clone()
            .unwrap_or_else(|| config_dir.join(HISTORY_FILENAME));
        HistoryStore::new(&path, self.history_max_entries).with_enabled(self.history_enabled)
    }
}

/// Per-user config directory, e.g. `~/.config/passforge` on Linux
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ForgeError::InvalidConfig("cannot determine the user config directory".to_string()))
}

/// Default settings file path
pub fn default_settings_path() -> Result<PathBuf> {
    Ok(default_config_dir()?.join(SETTINGS_FILENAME))
}
