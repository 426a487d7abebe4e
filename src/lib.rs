//! Helmsman: terse browser-session driving for integration tests.
//!
//! A [`Browser`] wraps an already-connected remote driver binding (anything
//! implementing [`PageDriver`]) and layers on the surface tests actually
//! write: retrying waits (`wait_for_element_displayed`, `wait_for_url`),
//! single-shot assertions with stable messages, navigation with status-code
//! verification, cookie and console-log access, and dialog/window helpers.
//!
//! The driver binding is injected explicitly; nothing in this crate owns a
//! wire protocol or a browser process.
//!
//! ```ignore
//! let browser = Browser::new(driver);
//! browser.load_page("/").await?;
//! let button = browser.wait_for_element_displayed("#submit").await?;
//! button.click().await?;
//! browser.wait_for_path("/done").await?;
//! ```

mod browser;
mod config;
mod console;
mod cookies;
mod dialogs;
mod elements;
mod errors;
mod forms;
mod navigation;
mod window;

pub use browser::Browser;
pub use config::DriverConfig;
pub use errors::{BrowserError, Result};
pub use navigation::{PageLoadOptions, StatusCodeExpectation};

// Re-export the contract and wait vocabulary so test suites depend on one crate.
pub use driver_adapter::{
    Cookie, DriverError, DriverErrorKind, ElementHandle, ElementRef, LogEntry, LogKind,
    PageDriver, WindowSize,
};
pub use wait_engine::{CountSpec, StringMatch, UrlExpectation, WaitError, WaitOptions};
