//! Query helpers over decrypted entries
//!
//! Matching never looks at the password itself.

use super::entry::HistoryEntry;
use crate::generator::GeneratorKind;

/// Check if a string contains the search phrase (case-insensitive)
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    text.to_lowercase().contains(&phrase.to_lowercase())
}

impl HistoryEntry {
    /// Case-insensitive substring match over type, description and settings
    pub fn matches(&self, query: &str) -> bool {
        contains_phrase(self.generator_type.name(), query)
            || self.description.as_deref().is_some_and(|d| contains_phrase(d, query))
            || contains_phrase(&self.settings, query)
    }
}

/// Entries matching `query`, order preserved
pub fn filter_entries(entries: Vec<HistoryEntry>, query: &str) -> Vec<HistoryEntry> {
    entries.into_iter().filter(|e| e.matches(query)).collect()
}

/// Entries produced by one generator kind, order preserved
pub fn filter_by_kind(entries: Vec<HistoryEntry>, kind: GeneratorKind) -> Vec<HistoryEntry> {
    entries.into_iter().filter(|e| e.generator_type == kind).collect()
}
