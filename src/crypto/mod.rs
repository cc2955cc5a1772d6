//! Authenticated encryption for data at rest
//!
//! PBKDF2-HMAC-SHA-256 key derivation and AES-256-GCM, serialized as
//! `salt(16) ‖ nonce(12) ‖ ciphertext ‖ tag(16)`.

mod aes;
mod blob;
mod key;

pub use aes::{decrypt, decrypt_with, encrypt, encrypt_with};
pub use blob::{EncryptedBlob, MIN_BLOB_SIZE};
pub use key::derive_key;

#[cfg(test)]
mod tests;
