//! A single record of a generation event

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::generator::{Generator, GeneratorKind};
use crate::utils::{format_datetime, mask_string};

/// One generated credential and the settings that produced it.
///
/// The password is plaintext only inside the decrypted working set and is
/// wiped when the entry is dropped. `Debug` output masks it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Assigned on insert when empty
    #[serde(default)]
    pub id: String,
    pub password: String,
    /// Length in characters
    pub length: usize,
    #[serde(rename = "type")]
    pub generator_type: GeneratorKind,
    /// Settings summary, e.g. `length=16, classes=lowercase+uppercase`
    pub settings: String,
    /// Assigned on insert when left at the epoch
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HistoryEntry {
    /// Record for a freshly generated credential
    pub fn from_generation(kind: GeneratorKind, password: &str, settings: &str) -> Self {
        Self {
            id: String::new(),
            password: password.to_string(),
            length: password.chars().count(),
            generator_type: kind,
            settings: settings.to_string(),
            created_at: DateTime::<Utc>::default(),
            description: None,
        }
    }

    /// Record built from the generator that produced `password`
    pub fn from_generator(generator: &Generator, password: &str) -> Self {
        Self::from_generation(generator.kind(), password, &generator.settings_summary())
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// True when no timestamp has been assigned yet
    pub fn is_unstamped(&self) -> bool {
        self.created_at.timestamp() == 0
    }

    /// Creation time in `YYYY-MM-DD HH:MM:SS` form
    pub fn created_display(&self) -> String {
        format_datetime(&self.created_at)
    }
}

impl fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("id", &self.id)
            .field("password", &mask_string(&self.password))
            .field("length", &self.length)
            .field("generator_type", &self.generator_type)
            .field("settings", &self.settings)
            .field("created_at", &self.created_display())
            .field("description", &self.description)
            .finish()
    }
}

impl Drop for HistoryEntry {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
