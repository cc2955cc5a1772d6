//! Encrypted generation history
//!
//! [`HistoryStore`] keeps an authenticated-encrypted, bounded list of
//! [`HistoryEntry`] records on disk, newest first. Saving history is
//! independent of generation: a failed write never invalidates a credential
//! that was already produced.

mod entry;
mod search;
mod store;

pub use entry::HistoryEntry;
pub use search::{contains_phrase, filter_by_kind, filter_entries};
pub use store::HistoryStore;
