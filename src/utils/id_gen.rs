//! ID generation utilities

/// Length of a history entry ID (UUID v4 without dashes)
pub const ENTRY_ID_LENGTH: usize = 32;

/// Generate a history entry ID (32 hex characters, UUID-like)
pub fn generate_entry_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// An entry ID is 32 lowercase hex characters
pub fn is_valid_entry_id(id: &str) -> bool {
    id.len() == ENTRY_ID_LENGTH && id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}
