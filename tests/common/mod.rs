//! In-memory driver binding used by the integration tests.
//!
//! Scripts a small mutable "document" behind the `PageDriver` contract:
//! elements can be placed up front, appear after a number of lookups, or
//! vanish after a number of lookups, and the current URL can switch after a
//! number of reads to simulate a redirect landing.

// Each test binary exercises a different slice of this harness.
#![allow(dead_code)]

use async_trait::async_trait;
use helmsman::{
    Cookie, DriverError, DriverErrorKind, ElementHandle, ElementRef, LogEntry, PageDriver,
    WindowSize,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Element scripted into the fake document.
pub struct FakeElement {
    displayed: bool,
    text: String,
    value: Mutex<String>,
    attributes: HashMap<String, String>,
    clicks: AtomicU32,
}

impl FakeElement {
    pub fn visible(text: &str) -> FakeElement {
        FakeElement {
            displayed: true,
            text: text.to_string(),
            value: Mutex::new(String::new()),
            attributes: HashMap::new(),
            clicks: AtomicU32::new(0),
        }
    }

    pub fn hidden() -> FakeElement {
        FakeElement {
            displayed: false,
            ..FakeElement::visible("")
        }
    }

    pub fn with_value(self, value: &str) -> FakeElement {
        *self.value.lock().expect("value lock") = value.to_string();
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> FakeElement {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn shared(self) -> Arc<FakeElement> {
        Arc::new(self)
    }

    pub fn click_count(&self) -> u32 {
        self.clicks.load(Ordering::SeqCst)
    }

    pub fn current_value(&self) -> String {
        self.value.lock().expect("value lock").clone()
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    async fn is_displayed(&self) -> Result<bool, DriverError> {
        Ok(self.displayed)
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, DriverError> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn text(&self) -> Result<String, DriverError> {
        Ok(self.text.clone())
    }

    async fn value(&self) -> Result<String, DriverError> {
        Ok(self.current_value())
    }

    async fn click(&self) -> Result<(), DriverError> {
        self.clicks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DriverError> {
        self.value.lock().expect("value lock").clear();
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), DriverError> {
        self.value.lock().expect("value lock").push_str(text);
        Ok(())
    }

    async fn elements_by_css(&self, _selector: &str) -> Result<Vec<ElementRef>, DriverError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct DriverState {
    url: String,
    status_code: u16,
    headers: Vec<(String, String)>,
    title: String,
    source: String,
    cookies: Vec<Cookie>,
    elements: HashMap<String, Vec<Arc<FakeElement>>>,
    /// selector -> lookups that still come back empty
    appear_after: HashMap<String, u32>,
    /// selector -> lookups after which the element disappears
    vanish_after: HashMap<String, u32>,
    lookup_counts: HashMap<String, u32>,
    log_batches: VecDeque<Vec<LogEntry>>,
    /// (reads left, url to land on)
    pending_redirect: Option<(u32, String)>,
    script_results: HashMap<String, Value>,
    navigations: Vec<String>,
    refreshes: u32,
    window_size: WindowSize,
    frame_switches: Vec<Option<String>>,
    window_switches: Vec<String>,
    closed_windows: u32,
    alert: Option<String>,
    alert_input: String,
    quit: bool,
}

pub struct FakeDriver {
    state: Mutex<DriverState>,
}

impl FakeDriver {
    pub fn new() -> Arc<FakeDriver> {
        Arc::new(FakeDriver {
            state: Mutex::new(DriverState {
                url: "http://testserver/".to_string(),
                status_code: 200,
                window_size: WindowSize {
                    width: 800,
                    height: 600,
                },
                ..DriverState::default()
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, DriverState> {
        self.state.lock().expect("driver state lock")
    }

    pub fn place(&self, selector: &str, element: Arc<FakeElement>) {
        self.state()
            .elements
            .entry(selector.to_string())
            .or_default()
            .push(element);
    }

    /// Element shows up only on the lookup after `polls` empty ones.
    pub fn place_after(&self, selector: &str, polls: u32, element: Arc<FakeElement>) {
        self.place(selector, element);
        self.state()
            .appear_after
            .insert(selector.to_string(), polls);
    }

    /// Element answers `polls` lookups, then vanishes.
    pub fn remove_after(&self, selector: &str, polls: u32) {
        self.state()
            .vanish_after
            .insert(selector.to_string(), polls);
    }

    pub fn lookups(&self, selector: &str) -> u32 {
        self.state()
            .lookup_counts
            .get(selector)
            .copied()
            .unwrap_or(0)
    }

    pub fn set_url(&self, url: &str) {
        self.state().url = url.to_string();
    }

    /// Switch the reported URL after `reads` reads of the current one.
    pub fn redirect_after(&self, reads: u32, url: &str) {
        self.state().pending_redirect = Some((reads, url.to_string()));
    }

    pub fn set_status(&self, code: u16) {
        self.state().status_code = code;
    }

    pub fn set_headers(&self, headers: Vec<(String, String)>) {
        self.state().headers = headers;
    }

    pub fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
    }

    pub fn set_source(&self, source: &str) {
        self.state().source = source.to_string();
    }

    pub fn push_logs(&self, batch: Vec<LogEntry>) {
        self.state().log_batches.push_back(batch);
    }

    pub fn script_result(&self, script: &str, value: Value) {
        self.state()
            .script_results
            .insert(script.to_string(), value);
    }

    pub fn open_alert(&self, text: &str) {
        self.state().alert = Some(text.to_string());
    }

    pub fn alert_input(&self) -> String {
        self.state().alert_input.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state().navigations.clone()
    }

    pub fn refreshes(&self) -> u32 {
        self.state().refreshes
    }

    pub fn frame_switches(&self) -> Vec<Option<String>> {
        self.state().frame_switches.clone()
    }

    pub fn window_switches(&self) -> Vec<String> {
        self.state().window_switches.clone()
    }

    pub fn closed_windows(&self) -> u32 {
        self.state().closed_windows
    }

    pub fn did_quit(&self) -> bool {
        self.state().quit
    }

    pub fn reported_window_size(&self) -> WindowSize {
        self.state().window_size
    }

    fn lookup(&self, selector: &str) -> Vec<ElementRef> {
        let mut state = self.state();
        *state
            .lookup_counts
            .entry(selector.to_string())
            .or_default() += 1;

        if let Some(remaining) = state.appear_after.get_mut(selector) {
            if *remaining > 0 {
                *remaining -= 1;
                return Vec::new();
            }
        }
        if let Some(remaining) = state.vanish_after.get_mut(selector) {
            if *remaining == 0 {
                return Vec::new();
            }
            *remaining -= 1;
        }

        state
            .elements
            .get(selector)
            .map(|elements| {
                elements
                    .iter()
                    .map(|element| Arc::clone(element) as ElementRef)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn element_by_css_or_null(
        &self,
        selector: &str,
    ) -> Result<Option<ElementRef>, DriverError> {
        Ok(self.lookup(selector).into_iter().next())
    }

    async fn elements_by_css(&self, selector: &str) -> Result<Vec<ElementRef>, DriverError> {
        Ok(self.lookup(selector))
    }

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let mut state = self.state();
        state.navigations.push(url.to_string());
        state.url = url.to_string();
        Ok(())
    }

    async fn refresh(&self) -> Result<(), DriverError> {
        self.state().refreshes += 1;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        let mut state = self.state();
        if let Some((remaining, next)) = state.pending_redirect.clone() {
            if remaining == 0 {
                state.url = next;
                state.pending_redirect = None;
            } else {
                state.pending_redirect = Some((remaining - 1, next));
            }
        }
        Ok(state.url.clone())
    }

    async fn wait_for_load_event(&self, _timeout: Duration) -> Result<(), DriverError> {
        Ok(())
    }

    async fn status_code(&self) -> Result<u16, DriverError> {
        Ok(self.state().status_code)
    }

    async fn headers(&self) -> Result<Vec<(String, String)>, DriverError> {
        Ok(self.state().headers.clone())
    }

    async fn title(&self) -> Result<String, DriverError> {
        Ok(self.state().title.clone())
    }

    async fn source(&self) -> Result<String, DriverError> {
        Ok(self.state().source.clone())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn execute(&self, script: &str) -> Result<Value, DriverError> {
        Ok(self
            .state()
            .script_results
            .get(script)
            .cloned()
            .unwrap_or(Value::Null))
    }

    async fn set_window_size(&self, size: WindowSize) -> Result<(), DriverError> {
        self.state().window_size = size;
        Ok(())
    }

    async fn window_size(&self) -> Result<WindowSize, DriverError> {
        Ok(self.state().window_size)
    }

    async fn switch_to_frame(&self, id: Option<&str>) -> Result<(), DriverError> {
        self.state()
            .frame_switches
            .push(id.map(str::to_string));
        Ok(())
    }

    async fn switch_to_window(&self, id: &str) -> Result<(), DriverError> {
        self.state().window_switches.push(id.to_string());
        Ok(())
    }

    async fn close_window(&self) -> Result<(), DriverError> {
        self.state().closed_windows += 1;
        Ok(())
    }

    async fn quit(&self) -> Result<(), DriverError> {
        self.state().quit = true;
        Ok(())
    }

    async fn cookies(&self) -> Result<Vec<Cookie>, DriverError> {
        Ok(self.state().cookies.clone())
    }

    async fn set_cookie(&self, cookie: Cookie) -> Result<(), DriverError> {
        let mut state = self.state();
        state.cookies.retain(|existing| existing.name != cookie.name);
        state.cookies.push(cookie);
        Ok(())
    }

    async fn delete_cookie(&self, name: &str) -> Result<(), DriverError> {
        self.state().cookies.retain(|cookie| cookie.name != name);
        Ok(())
    }

    async fn delete_all_cookies(&self) -> Result<(), DriverError> {
        self.state().cookies.clear();
        Ok(())
    }

    async fn alert_text(&self) -> Result<String, DriverError> {
        self.state().alert.clone().ok_or_else(|| {
            DriverError::new(DriverErrorKind::NoAlertOpen, "no dialog is open")
        })
    }

    async fn type_into_alert(&self, text: &str) -> Result<(), DriverError> {
        let mut state = self.state();
        if state.alert.is_none() {
            return Err(DriverError::new(
                DriverErrorKind::NoAlertOpen,
                "no dialog is open",
            ));
        }
        state.alert_input = text.to_string();
        Ok(())
    }

    async fn accept_alert(&self) -> Result<(), DriverError> {
        self.state().alert.take().map(|_| ()).ok_or_else(|| {
            DriverError::new(DriverErrorKind::NoAlertOpen, "no dialog is open")
        })
    }

    async fn dismiss_alert(&self) -> Result<(), DriverError> {
        self.state().alert.take().map(|_| ()).ok_or_else(|| {
            DriverError::new(DriverErrorKind::NoAlertOpen, "no dialog is open")
        })
    }

    async fn console_logs(&self) -> Result<Vec<LogEntry>, DriverError> {
        Ok(self.state().log_batches.pop_front().unwrap_or_default())
    }
}

static TRACING: std::sync::Once = std::sync::Once::new();

/// Browser over a fresh fake driver, with the fast poll cadence tests want.
pub fn harness() -> (helmsman::Browser, Arc<FakeDriver>) {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });

    let driver = FakeDriver::new();
    let config = helmsman::DriverConfig {
        element_timeout_ms: 1_000,
        navigation_timeout_ms: 1_000,
        poll_interval_ms: 5,
        initial_window_size: WindowSize {
            width: 1024,
            height: 768,
        },
    };
    let browser = helmsman::Browser::with_config(
        Arc::clone(&driver) as Arc<dyn PageDriver>,
        config,
    );
    (browser, driver)
}
