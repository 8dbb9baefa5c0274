//! Session state and concurrency guards.

use std::sync::atomic::{AtomicBool, Ordering};

use attire_common::SessionId;

use crate::{AiError, GenerationParams, ModelSession};

/// Observable state of the session manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    HasSession,
}

/// The live session plus the parameters it was created with.
pub(super) struct ActiveSession {
    pub(super) id: SessionId,
    pub(super) params: GenerationParams,
    pub(super) handle: Box<dyn ModelSession>,
}

/// Guard that clears the `busy` flag on drop, so the flag is released even
/// if the submitting future is dropped mid-request.
pub(super) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Returns `AiError::Busy` if taken.
    pub(super) fn acquire(flag: &'a AtomicBool) -> Result<Self, AiError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(AiError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
