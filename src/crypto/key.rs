//! Passphrase-based key derivation
//!
//! PBKDF2-HMAC-SHA-256 turns the caller's passphrase and a per-file random
//! salt into a 256-bit AES key. The key is held in a [`Zeroizing`] buffer and
//! wiped when dropped.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::KEY_LENGTH;
use crate::error::{ForgeError, Result};

/// Derive a 32-byte key from `passphrase` and `salt`
///
/// # Arguments
///
/// * `passphrase` - The caller's passphrase, used as UTF-8 bytes
/// * `salt` - Per-encryption random salt
/// * `iterations` - PBKDF2 rounds; must be non-zero
///
/// # Returns
///
/// The key in a buffer that is wiped on drop.
pub fn derive_key(passphrase: &str, salt: &[u8], iterations: u32) -> Result<Zeroizing<[u8; KEY_LENGTH]>> {
    if iterations == 0 {
        return Err(ForgeError::InvalidConfig("PBKDF2 iterations must be non-zero".to_string()));
    }

    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, key.as_mut_slice());
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RFC 7914 section 11 test vector for PBKDF2-HMAC-SHA-256
    #[test]
    fn test_rfc7914_vector() {
        let key = derive_key("passwd", b"salt", 1).unwrap();
        let expected: [u8; 32] = [
            0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f,
            0xec, 0x16, 0x91, 0xc2, 0x25, 0x44, 0xb6, 0x05,
            0xf9, 0x41, 0x85, 0x21, 0x6d, 0xde, 0x04, 0x65,
            0xe6, 0x8b, 0x9d, 0x57, 0xc2, 0x0d, 0xac, 0xbc,
        ];
        assert_eq!(*key, expected);
    }

    #[test]
    fn test_deterministic() {
        let a = derive_key("correct horse", b"0123456789abcdef", 1000).unwrap();
        let b = derive_key("correct horse", b"0123456789abcdef", 1000).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn test_salt_changes_key() {
        let a = derive_key("correct horse", b"0123456789abcdef", 1000).unwrap();
        let b = derive_key("correct horse", b"fedcba9876543210", 1000).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn test_iterations_change_key() {
        let a = derive_key("correct horse", b"0123456789abcdef", 1000).unwrap();
        let b = derive_key("correct horse", b"0123456789abcdef", 1001).unwrap();
        assert_ne!(*a, *b);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(derive_key("x", b"salt", 0), Err(ForgeError::InvalidConfig(_))));
    }
}
