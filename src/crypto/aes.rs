//! AES-256-GCM encryption and decryption
//!
//! Every call to [`encrypt_with`] draws a fresh salt and nonce, derives a
//! fresh key, and seals the whole plaintext. Decryption either authenticates
//! the full ciphertext or fails; no partial plaintext is ever returned.

use aes_gcm::Aes256Gcm;
use aes_gcm::aead::{Aead, KeyInit, generic_array::GenericArray};
use log::{debug, warn};
use zeroize::Zeroizing;

use super::blob::EncryptedBlob;
use super::key::derive_key;
use crate::error::{ForgeError, Result};
use crate::random::{OsRandom, RandomSource};
use crate::{NONCE_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};

/// Encrypt `plaintext` under `passphrase` and return the serialized blob.
///
/// Uses the OS random source and the default PBKDF2 iteration count.
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    Ok(encrypt_with(plaintext, passphrase, PBKDF2_ITERATIONS, &OsRandom)?.to_bytes())
}

/// Decrypt a serialized blob produced by [`encrypt`]
pub fn decrypt(data: &[u8], passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let blob = EncryptedBlob::from_bytes(data)?;
    decrypt_with(&blob, passphrase, PBKDF2_ITERATIONS)
}

/// Encrypt with an explicit iteration count and salt/nonce source
///
/// # Arguments
///
/// * `plaintext` - Bytes to seal; may be empty
/// * `passphrase` - Passphrase the key is derived from
/// * `iterations` - PBKDF2 iteration count; decryption must use the same value
/// * `source` - Source of the fresh 16-byte salt and 12-byte nonce
///
/// # Returns
///
/// The salt, nonce and ciphertext with its tag. Fails with
/// `RandomnessFailure` when the source cannot be read, and with
/// `InvalidConfig` for a zero iteration count.
pub fn encrypt_with(
    plaintext: &[u8],
    passphrase: &str,
    iterations: u32,
    source: &dyn RandomSource,
) -> Result<EncryptedBlob> {
    let mut salt = [0u8; SALT_SIZE];
    let mut nonce = [0u8; NONCE_SIZE];
    source.fill_bytes(&mut salt)?;
    source.fill_bytes(&mut nonce)?;

    let key = derive_key(passphrase, &salt, iterations)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| ForgeError::EncryptionError(format!("Invalid key: {}", e)))?;

    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| ForgeError::EncryptionError("AES-GCM encryption failed".to_string()))?;

    debug!("Encrypted {} bytes", plaintext.len());
    Ok(EncryptedBlob { salt, nonce, ciphertext })
}

/// Decrypt with an explicit iteration count.
///
/// Fails with [`ForgeError::DecryptionError`] on a wrong passphrase or any
/// modification of salt, nonce, ciphertext or tag.
pub fn decrypt_with(blob: &EncryptedBlob, passphrase: &str, iterations: u32) -> Result<Zeroizing<Vec<u8>>> {
    let key = derive_key(passphrase, &blob.salt, iterations)?;
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| ForgeError::DecryptionError(format!("Invalid key: {}", e)))?;

    let plaintext = cipher
        .decrypt(GenericArray::from_slice(&blob.nonce), blob.ciphertext.as_slice())
        .map_err(|_| {
            warn!("Authentication failed while decrypting {} bytes", blob.ciphertext.len());
            ForgeError::DecryptionError("wrong passphrase or corrupted data".to_string())
        })?;

    Ok(Zeroizing::new(plaintext))
}
