//! Cooperative cancellation.
//!
//! A carve is abandoned, never interrupted: the engine polls the token
//! between seams, not inside the per-pixel loops, so a fired token
//! costs at most one extra seam of work.

use crate::error::CarveError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag shared between the caller and a running carve.
/// Clones observe the same underlying signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    /// Request cancellation.  Safe to call from any thread, any
    /// number of times.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Poll point: errors out of the current carve if the token has
    /// fired.
    pub fn check(&self) -> Result<(), CarveError> {
        if self.is_cancelled() {
            Err(CarveError::Cancelled)
        } else {
            Ok(())
        }
    }
}
