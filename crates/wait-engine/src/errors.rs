//! Failure classification for waits and checks.

use driver_adapter::DriverError;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a failed check or wait.
///
/// Exactly one variant is eligible for polling retry: [`WaitError::Condition`].
/// Everything else propagates out of the wait loop immediately. Timeout is a
/// derived terminal state: a retriable failure that exhausts its deadline is
/// re-surfaced as [`WaitError::Timeout`] with the original message preserved.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The condition is not true yet; a later poll may observe it.
    #[error("{0}")]
    Condition(String),

    /// A retriable condition ran out its deadline.
    #[error("Timeout ({ms}ms): {message}", ms = .timeout.as_millis())]
    Timeout { timeout: Duration, message: String },

    /// The check failed in a way polling cannot fix (count bounds, status
    /// codes, ambiguous selectors).
    #[error("{0}")]
    Assertion(String),

    /// The remote driver itself failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl WaitError {
    /// Whether the retry loop may run this check again.
    pub fn is_retriable(&self) -> bool {
        matches!(self, WaitError::Condition(_))
    }

    /// Re-surface a retriable failure as the terminal timeout failure.
    /// Non-retriable errors pass through untouched.
    pub fn into_timeout(self, timeout: Duration) -> WaitError {
        match self {
            WaitError::Condition(message) => WaitError::Timeout { timeout, message },
            other => other,
        }
    }
}
