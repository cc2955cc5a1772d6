//! Uniform sampling from the OS random source

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::error::{ForgeError, Result};

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between threads. The provided
/// [`uniform`](RandomSource::uniform) is unbiased for any implementation whose
/// `fill_bytes` is uniform.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` with random bytes or fail.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;

    /// Return an integer in `[0, n)` with every value equally likely.
    ///
    /// Uses rejection sampling over 64-bit draws: values below
    /// `2^64 mod n` are discarded so the accepted range is an exact
    /// multiple of `n`.
    fn uniform(&self, n: usize) -> Result<usize> {
        if n == 0 {
            return Err(ForgeError::InvalidConfig(
                "uniform range must be non-empty".to_string(),
            ));
        }
        if n == 1 {
            return Ok(0);
        }

        let n = n as u64;
        let threshold = n.wrapping_neg() % n;
        let mut buf = [0u8; 8];
        loop {
            self.fill_bytes(&mut buf)?;
            let value = u64::from_le_bytes(buf);
            if value >= threshold {
                return Ok((value % n) as usize);
            }
        }
    }
}

/// Operating system CSPRNG (`getrandom` under the hood)
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl OsRandom {
    /// Create a handle to the OS random source
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| ForgeError::RandomnessFailure(e.to_string()))
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &T {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for std::sync::Arc<T> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_bytes(dest)
    }
}
