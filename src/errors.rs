//! Error surface of the browser facade.

use driver_adapter::DriverError;
use thiserror::Error;
use wait_engine::WaitError;

pub type Result<T> = std::result::Result<T, BrowserError>;

/// Failure reported by a facade operation.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// A wait or single-shot assertion failed.
    #[error(transparent)]
    Wait(#[from] WaitError),

    /// The operation was invoked in a way the session cannot honor
    /// (ambiguous selector for a unique-element operation, and similar).
    #[error("{0}")]
    Usage(String),
}

impl From<DriverError> for BrowserError {
    fn from(err: DriverError) -> Self {
        BrowserError::Wait(WaitError::Driver(err))
    }
}
