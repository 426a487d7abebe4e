//! Wire-adjacent data shared between the driver contract and the facade.

use serde::{Deserialize, Serialize};

/// Browser cookie as exposed by the remote session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Severity bucket of a captured console entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Error,
    Warn,
    Log,
    Debug,
}

impl LogKind {
    /// Map a remote severity level (`SEVERE`, `WARNING`, `INFO`, `DEBUG`) to
    /// the bucket the facade reports. Driver bindings call this when they
    /// translate raw log payloads.
    pub fn from_remote_level(level: &str) -> Option<Self> {
        match level {
            "SEVERE" => Some(LogKind::Error),
            "WARNING" => Some(LogKind::Warn),
            "INFO" => Some(LogKind::Log),
            "DEBUG" => Some(LogKind::Debug),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogKind::Error => "error",
            LogKind::Warn => "warn",
            LogKind::Log => "log",
            LogKind::Debug => "debug",
        }
    }
}

/// One console entry captured from the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl LogEntry {
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp_ms: 0,
        }
    }
}

/// Outer window dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}
