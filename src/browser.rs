//! Browser session object: owns the driver handle and per-session state.

use crate::config::DriverConfig;
use crate::errors::Result;
use driver_adapter::{LogEntry, PageDriver};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// A live browser session.
///
/// Wraps an injected remote driver binding with the convenience surface
/// integration tests use. All methods borrow `&self`; the only per-session
/// mutable state, the console-log hold-back buffer, sits behind a mutex so
/// each session keeps its own cursor and two sessions never share one.
pub struct Browser {
    pub(crate) driver: Arc<dyn PageDriver>,
    pub(crate) config: DriverConfig,
    pub(crate) pending_logs: Mutex<Vec<LogEntry>>,
}

impl Browser {
    /// Wrap an already-connected driver binding with default configuration.
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self::with_config(driver, DriverConfig::default())
    }

    /// Wrap an already-connected driver binding.
    pub fn with_config(driver: Arc<dyn PageDriver>, config: DriverConfig) -> Self {
        Self {
            driver,
            config,
            pending_logs: Mutex::new(Vec::new()),
        }
    }

    /// Apply the configured window size. Harnesses call this once right after
    /// the session opens.
    pub async fn init(&self) -> Result<()> {
        self.driver
            .set_window_size(self.config.initial_window_size)
            .await?;
        Ok(())
    }

    /// The underlying driver binding, for operations the facade does not wrap.
    pub fn driver(&self) -> &Arc<dyn PageDriver> {
        &self.driver
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run a script in the page context and return its value.
    pub async fn evaluate(&self, script: &str) -> Result<Value> {
        Ok(self.driver.execute(script).await?)
    }

    /// End the remote session.
    pub async fn close(&self) -> Result<()> {
        info!("closing browser session");
        self.driver.quit().await?;
        Ok(())
    }
}
