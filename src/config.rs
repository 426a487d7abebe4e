//! Session configuration for the browser facade.

use driver_adapter::WindowSize;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Tunables for a browser session.
///
/// Element waits and navigation waits carry separate defaults: a redirect
/// chain routinely takes longer than a DOM re-render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Default deadline for element waits, in milliseconds.
    pub element_timeout_ms: u64,
    /// Default deadline for URL and path waits, in milliseconds.
    pub navigation_timeout_ms: u64,
    /// Delay between poll attempts, in milliseconds.
    pub poll_interval_ms: u64,
    /// Window size applied by [`crate::Browser::init`].
    pub initial_window_size: WindowSize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: env_ms("HELMSMAN_ELEMENT_TIMEOUT_MS", 3_000),
            navigation_timeout_ms: env_ms("HELMSMAN_NAVIGATION_TIMEOUT_MS", 5_000),
            poll_interval_ms: env_ms("HELMSMAN_POLL_INTERVAL_MS", 50),
            initial_window_size: WindowSize {
                width: 1024,
                height: 768,
            },
        }
    }
}

impl DriverConfig {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn env_ms(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}
