//! Test doubles for [`RandomSource`]

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{OsRandom, RandomSource};
use crate::error::{ForgeError, Result};

/// Always fails
pub(crate) struct FailingSource;

impl RandomSource for FailingSource {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<()> {
        Err(ForgeError::RandomnessFailure("entropy unavailable".to_string()))
    }
}

/// Succeeds for a fixed number of reads, then fails
pub(crate) struct ExhaustingSource {
    remaining: AtomicUsize,
}

impl ExhaustingSource {
    pub(crate) fn new(reads: usize) -> Self {
        Self { remaining: AtomicUsize::new(reads) }
    }
}

impl RandomSource for ExhaustingSource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left == 0 {
            return Err(ForgeError::RandomnessFailure("exhausted".to_string()));
        }
        self.remaining.store(left - 1, Ordering::SeqCst);
        OsRandom.fill_bytes(dest)
    }
}
