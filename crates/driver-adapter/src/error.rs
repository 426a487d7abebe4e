//! Error surface of the remote-driver contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// High-level failure categories a driver binding can report.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverErrorKind {
    #[error("transport failure")]
    Transport,
    #[error("invalid selector")]
    InvalidSelector,
    #[error("no such window")]
    NoSuchWindow,
    #[error("no alert open")]
    NoAlertOpen,
    #[error("session closed")]
    SessionClosed,
    #[error("protocol violation")]
    Protocol,
}

/// Error reported by the external driver binding.
///
/// Driver errors signal a broken session, a malformed request, or a transport
/// failure rather than a page that has not caught up yet, so they are never
/// eligible for polling retry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Transport, message)
    }

    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::InvalidSelector, selector)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Protocol, message)
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for DriverError {}
