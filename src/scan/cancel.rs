//! Shared abort signal for scan workers

use crate::error::CompareError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation token shared by every worker of one run.
///
/// The first recorded error wins; later errors are dropped. Workers poll
/// [`CancelToken::is_cancelled`] before each visit and stop dispatching work
/// once it is set.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: AtomicBool,
    first_error: Mutex<Option<CompareError>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation without an error
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Record `err` if it is the first failure, then cancel.
    ///
    /// Returns true if this error was recorded.
    pub fn fail(&self, err: CompareError) -> bool {
        let recorded = {
            let mut slot = self.first_error.lock();
            if slot.is_none() {
                *slot = Some(err);
                true
            } else {
                false
            }
        };
        self.cancel();
        recorded
    }

    /// Take the recorded error, if any
    pub fn take_error(&self) -> Option<CompareError> {
        self.first_error.lock().take()
    }
}
