//! On-disk layout of an encrypted payload: `salt ‖ nonce ‖ ciphertext+tag`

use crate::error::{ForgeError, Result};
use crate::{NONCE_SIZE, SALT_SIZE, TAG_SIZE};

/// Smallest valid blob: header plus the GCM tag of an empty plaintext
pub const MIN_BLOB_SIZE: usize = SALT_SIZE + NONCE_SIZE + TAG_SIZE;

/// Salt, nonce and authenticated ciphertext of one encryption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub salt: [u8; SALT_SIZE],
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the 16-byte GCM tag appended
    pub ciphertext: Vec<u8>,
}

impl EncryptedBlob {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split serialized bytes back into their parts.
    ///
    /// Anything shorter than [`MIN_BLOB_SIZE`] cannot carry a tag and is
    /// reported as a decryption failure.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_BLOB_SIZE {
            return Err(ForgeError::DecryptionError(format!(
                "encrypted data truncated ({} bytes, need at least {})",
                data.len(),
                MIN_BLOB_SIZE
            )));
        }

        let (salt, rest) = data.split_at(SALT_SIZE);
        let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);

        let mut blob = Self {
            salt: [0u8; SALT_SIZE],
            nonce: [0u8; NONCE_SIZE],
            ciphertext: ciphertext.to_vec(),
        };
        blob.salt.copy_from_slice(salt);
        blob.nonce.copy_from_slice(nonce);
        Ok(blob)
    }
}
