//! Cancellation and deadlines for multi-draw operations

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{ForgeError, Result};

/// Cancellation signal checked between random draws.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// and cancelled from there.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that is never cancelled and has no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that expires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// A token that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail with the matching cancellation error if the token fired
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(ForgeError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ForgeError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
