//! Round-trip, authentication and freshness tests for the crypto module

use rand::Rng;

use super::*;
use crate::error::ForgeError;
use crate::random::OsRandom;
use crate::random::testing::FailingSource;

/// Low iteration count keeps the stress loops fast; the format is unchanged
const TEST_ITERATIONS: u32 = 1_000;

const TEST_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz\
    0123456789_!@#$%^&*()<>,./?ЙЦУКЕНГШЩЗФЫВАПРОЛДЯЧСМИТЬБЮйцукенгшщзхъфывапролджэёячсмитьбю";

fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    let chars: Vec<char> = TEST_CHARS.chars().collect();
    (0..len)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random()).collect()
}

#[test]
fn test_stress_arbitrary_bytes() {
    let mut rng = rand::rng();

    for i in 0..50 {
        let passphrase = random_string(rng.random_range(1..64));
        let plaintext = random_bytes(rng.random_range(0..2000));

        let blob = encrypt_with(&plaintext, &passphrase, TEST_ITERATIONS, &OsRandom)
            .unwrap_or_else(|e| panic!("Encryption should succeed, iteration {}: {}", i, e));
        let bytes = blob.to_bytes();
        assert_eq!(bytes.len(), plaintext.len() + MIN_BLOB_SIZE);

        let parsed = EncryptedBlob::from_bytes(&bytes).unwrap();
        let decrypted = decrypt_with(&parsed, &passphrase, TEST_ITERATIONS)
            .unwrap_or_else(|e| panic!("Decryption should succeed, iteration {}: {}", i, e));
        assert_eq!(decrypted.as_slice(), plaintext.as_slice(), "Mismatch at iteration {}", i);
    }
}

#[test]
fn test_default_round_trip() {
    let data = b"{\"entries\":[]}";
    let encrypted = encrypt(data, "hunter2").unwrap();
    assert_eq!(decrypt(&encrypted, "hunter2").unwrap().as_slice(), data);
}

#[test]
fn test_empty_payload_and_passphrase() {
    let blob = encrypt_with(b"", "", TEST_ITERATIONS, &OsRandom).unwrap();
    assert_eq!(blob.ciphertext.len(), crate::TAG_SIZE);
    assert!(decrypt_with(&blob, "", TEST_ITERATIONS).unwrap().is_empty());
}

#[test]
fn test_wrong_passphrase() {
    let blob = encrypt_with(b"secret history", "right", TEST_ITERATIONS, &OsRandom).unwrap();
    let result = decrypt_with(&blob, "wrong", TEST_ITERATIONS);
    assert!(matches!(result, Err(ForgeError::DecryptionError(_))));
}

#[test]
fn test_wrong_iterations() {
    let blob = encrypt_with(b"secret history", "right", TEST_ITERATIONS, &OsRandom).unwrap();
    let result = decrypt_with(&blob, "right", TEST_ITERATIONS + 1);
    assert!(matches!(result, Err(ForgeError::DecryptionError(_))));
}

#[test]
fn test_tampering_detected() {
    let plaintext = b"tamper-evident payload";
    let bytes = encrypt_with(plaintext, "pass", TEST_ITERATIONS, &OsRandom).unwrap().to_bytes();

    // Flip one bit in every position: salt, nonce, ciphertext and tag
    for pos in 0..bytes.len() {
        let mut corrupted = bytes.clone();
        corrupted[pos] ^= 0x01;
        let blob = EncryptedBlob::from_bytes(&corrupted).unwrap();
        let result = decrypt_with(&blob, "pass", TEST_ITERATIONS);
        assert!(
            matches!(result, Err(ForgeError::DecryptionError(_))),
            "Corruption at byte {} not detected",
            pos
        );
    }
}

#[test]
fn test_truncated_ciphertext() {
    let bytes = encrypt_with(b"some data", "pass", TEST_ITERATIONS, &OsRandom).unwrap().to_bytes();

    let short = &bytes[..bytes.len() - 1];
    let blob = EncryptedBlob::from_bytes(short).unwrap();
    assert!(matches!(decrypt_with(&blob, "pass", TEST_ITERATIONS), Err(ForgeError::DecryptionError(_))));

    assert!(matches!(decrypt(&bytes[..10], "pass"), Err(ForgeError::DecryptionError(_))));
}

#[test]
fn test_fresh_salt_and_nonce() {
    let a = encrypt_with(b"same", "same", TEST_ITERATIONS, &OsRandom).unwrap();
    let b = encrypt_with(b"same", "same", TEST_ITERATIONS, &OsRandom).unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn test_random_failure_propagates() {
    let result = encrypt_with(b"data", "pass", TEST_ITERATIONS, &FailingSource);
    assert!(matches!(result, Err(ForgeError::RandomnessFailure(_))));
}
