//! Error types for Passforge Core

use thiserror::Error;

/// Main error type for generation and history operations
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Generator or store configuration is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The OS random source could not be read
    #[error("Randomness failure: {0}")]
    RandomnessFailure(String),

    /// Generation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Generation ran past its deadline
    #[error("Operation deadline exceeded")]
    DeadlineExceeded,

    /// Encryption failed
    #[error("Encryption error: {0}")]
    EncryptionError(String),

    /// Decryption failed - wrong passphrase, tampered or truncated data
    #[error("Decryption error: {0}")]
    DecryptionError(String),

    /// Filesystem operation failed
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// History payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// History is switched off
    #[error("History is disabled")]
    HistoryDisabled,

    /// History is enabled but no passphrase has been provided
    #[error("History passphrase not set")]
    PassphraseNotSet,
}

impl ForgeError {
    /// True for the cancellation family (manual cancel or deadline)
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ForgeError::Cancelled | ForgeError::DeadlineExceeded)
    }
}

impl From<serde_json::Error> for ForgeError {
    fn from(err: serde_json::Error) -> Self {
        ForgeError::SerializationError(err.to_string())
    }
}

impl From<tempfile::PersistError> for ForgeError {
    fn from(err: tempfile::PersistError) -> Self {
        ForgeError::PersistenceError(err.error.to_string())
    }
}

/// Result type alias for Passforge operations
pub type Result<T> = std::result::Result<T, ForgeError>;
