//! Async traits the remote driver binding implements.

use crate::error::DriverError;
use crate::types::{Cookie, LogEntry, WindowSize};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Shared handle to a live element in the remote document.
///
/// The handle is opaque: the facade and the wait engine pass it around and
/// call its getters, but never inspect or mutate its internals. A handle can
/// go stale when the document re-renders; waits re-resolve their selector on
/// every poll instead of holding on to one handle.
pub type ElementRef = Arc<dyn ElementHandle>;

/// One element inside the remote session.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Whether the element is rendered and visible.
    async fn is_displayed(&self) -> Result<bool, DriverError>;

    /// Attribute value, or `None` when the attribute is not set.
    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError>;

    /// Visible text content.
    async fn text(&self) -> Result<String, DriverError>;

    /// Current input value.
    async fn value(&self) -> Result<String, DriverError>;

    async fn click(&self) -> Result<(), DriverError>;

    /// Clear the field's current value.
    async fn clear(&self) -> Result<(), DriverError>;

    /// Send keystrokes to the element.
    async fn type_text(&self, text: &str) -> Result<(), DriverError>;

    /// Descendant elements matching a CSS selector.
    async fn elements_by_css(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError>;
}

impl std::fmt::Debug for dyn ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ElementHandle")
    }
}

/// Remote session capability the facade drives.
///
/// Every method is a single remote round-trip; composition, retrying, and
/// assertion semantics live above this trait.
#[async_trait]
pub trait PageDriver: Send + Sync {
    // Element lookup

    /// First element matching `selector`, or `None`.
    async fn element_by_css_or_null(
        &self,
        selector: &str,
    ) -> Result<Option<ElementRef>, DriverError>;

    /// All elements matching `selector`.
    async fn elements_by_css(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError>;

    // Navigation

    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    async fn refresh(&self) -> Result<(), DriverError>;

    async fn current_url(&self) -> Result<String, DriverError>;

    /// Block until the page's load event has fired, bounded by `timeout`.
    async fn wait_for_load_event(&self, timeout: Duration) -> Result<(), DriverError>;

    // Page data

    /// Status code of the most recent top-level navigation.
    async fn status_code(&self) -> Result<u16, DriverError>;

    /// Response headers of the most recent top-level navigation.
    async fn headers(&self) -> Result<Vec<(String, String)>, DriverError>;

    async fn title(&self) -> Result<String, DriverError>;

    async fn source(&self) -> Result<String, DriverError>;

    /// PNG bytes of the current viewport.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;

    /// Run a script in the page context and return its value.
    async fn execute(&self, script: &str) -> Result<Value, DriverError>;

    // Window control

    async fn set_window_size(&self, size: WindowSize) -> Result<(), DriverError>;

    async fn window_size(&self) -> Result<WindowSize, DriverError>;

    /// Switch into a frame by id, or back to the top document with `None`.
    async fn switch_to_frame(&self, id: Option<&str>) -> Result<(), DriverError>;

    async fn switch_to_window(&self, id: &str) -> Result<(), DriverError>;

    async fn close_window(&self) -> Result<(), DriverError>;

    /// End the session.
    async fn quit(&self) -> Result<(), DriverError>;

    // Cookies

    async fn cookies(&self) -> Result<Vec<Cookie>, DriverError>;

    async fn set_cookie(&self, cookie: Cookie) -> Result<(), DriverError>;

    async fn delete_cookie(&self, name: &str) -> Result<(), DriverError>;

    async fn delete_all_cookies(&self) -> Result<(), DriverError>;

    // Dialogs

    async fn alert_text(&self) -> Result<String, DriverError>;

    async fn type_into_alert(&self, text: &str) -> Result<(), DriverError>;

    async fn accept_alert(&self) -> Result<(), DriverError>;

    async fn dismiss_alert(&self) -> Result<(), DriverError>;

    // Console

    /// Console entries produced since the previous call. The driver owns the
    /// "new since last fetch" cursor; the facade layers per-kind filtering
    /// and caching on top.
    async fn console_logs(&self) -> Result<Vec<LogEntry>, DriverError>;
}
