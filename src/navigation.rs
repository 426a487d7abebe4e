//! Navigation, page-load verification, and URL/path waits.

use crate::browser::Browser;
use crate::errors::Result;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;
use wait_engine::{
    engine, PropertyAsserter, StringMatch, UrlAsserter, UrlExpectation, WaitError, WaitOptions,
};

/// Expected status code for [`Browser::load_page_with`].
pub enum StatusCodeExpectation {
    /// Exactly this code.
    Exactly(u16),
    /// The code's decimal form matches this pattern.
    Pattern(Regex),
    /// Caller-supplied predicate over the code.
    Satisfies(Box<dyn Fn(u16) -> bool + Send + Sync>),
}

impl StatusCodeExpectation {
    fn check(&self, actual: u16) -> std::result::Result<(), String> {
        match self {
            StatusCodeExpectation::Exactly(expected) if actual == *expected => Ok(()),
            StatusCodeExpectation::Exactly(expected) => {
                Err(format!("Expected: {expected}\nActually: {actual}"))
            }
            StatusCodeExpectation::Pattern(pattern) if pattern.is_match(&actual.to_string()) => {
                Ok(())
            }
            StatusCodeExpectation::Pattern(pattern) => Err(format!(
                "Pattern /{}/ doesn't match statusCode\nActually: {actual}",
                pattern.as_str()
            )),
            StatusCodeExpectation::Satisfies(predicate) if predicate(actual) => Ok(()),
            StatusCodeExpectation::Satisfies(_) => {
                Err(format!("StatusCode is as expected\nActually: {actual}"))
            }
        }
    }
}

impl Default for StatusCodeExpectation {
    fn default() -> Self {
        StatusCodeExpectation::Exactly(200)
    }
}

impl From<u16> for StatusCodeExpectation {
    fn from(code: u16) -> Self {
        StatusCodeExpectation::Exactly(code)
    }
}

impl From<Regex> for StatusCodeExpectation {
    fn from(pattern: Regex) -> Self {
        StatusCodeExpectation::Pattern(pattern)
    }
}

impl fmt::Debug for StatusCodeExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCodeExpectation::Exactly(code) => write!(f, "Exactly({code})"),
            StatusCodeExpectation::Pattern(pattern) => write!(f, "Pattern(/{}/)", pattern.as_str()),
            StatusCodeExpectation::Satisfies(_) => write!(f, "Satisfies(..)"),
        }
    }
}

/// Options for [`Browser::load_page_with`].
#[derive(Debug, Default)]
pub struct PageLoadOptions {
    pub expected_status: StatusCodeExpectation,
    /// Also block on the page's load event after the status check.
    pub wait_for_load_event: bool,
    /// Extra query parameters appended to the URL before navigating.
    pub query: Vec<(String, String)>,
}

impl PageLoadOptions {
    pub fn expecting_status(expected: impl Into<StatusCodeExpectation>) -> Self {
        Self {
            expected_status: expected.into(),
            ..Self::default()
        }
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_load_event(mut self) -> Self {
        self.wait_for_load_event = true;
        self
    }
}

impl Browser {
    /// Navigate the session to `url`.
    pub async fn navigate_to(&self, url: &str) -> Result<()> {
        info!(url, "navigating");
        self.driver.navigate(url).await?;
        Ok(())
    }

    /// Navigate with extra query parameters appended to `url`.
    pub async fn navigate_to_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<()> {
        let target = append_query(url, query);
        self.navigate_to(&target).await
    }

    /// Navigate to `url` and verify it answered with status 200.
    pub async fn load_page(&self, url: &str) -> Result<()> {
        self.load_page_with(url, PageLoadOptions::default()).await
    }

    /// Navigate to `url`, verify the status code, and optionally block on the
    /// load event.
    pub async fn load_page_with(&self, url: &str, options: PageLoadOptions) -> Result<()> {
        let pairs: Vec<(&str, &str)> = options
            .query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        let target = append_query(url, &pairs);

        info!(url = %target, "loading page");
        self.driver.navigate(&target).await?;

        let status = self.driver.status_code().await?;
        if let Err(message) = options.expected_status.check(status) {
            return Err(WaitError::Assertion(message).into());
        }

        if options.wait_for_load_event {
            self.driver
                .wait_for_load_event(self.config.navigation_timeout())
                .await?;
        }
        Ok(())
    }

    /// Reload the current page.
    pub async fn refresh(&self) -> Result<()> {
        self.driver.refresh().await?;
        Ok(())
    }

    /// Current URL of the session.
    pub async fn get_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?)
    }

    /// Path-plus-query portion of the current URL.
    pub async fn get_path(&self) -> Result<String> {
        let raw = self.driver.current_url().await?;
        Ok(path_of(&raw))
    }

    /// Wait until the current URL matches.
    pub async fn wait_for_url(&self, url: impl Into<StringMatch>) -> Result<()> {
        self.wait_for_url_with(
            url,
            Vec::new(),
            self.config.navigation_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Wait until the current URL matches, with per-key query expectations
    /// and an explicit deadline and poll cadence. A pattern expectation
    /// matches the whole URL and skips the query checks.
    pub async fn wait_for_url_with(
        &self,
        url: impl Into<StringMatch>,
        query: Vec<(String, StringMatch)>,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<()> {
        let expectation = UrlExpectation {
            url: url.into(),
            query,
        };
        debug!(?expectation, ?timeout, "waiting for url");
        let asserter = UrlAsserter::new(expectation);
        let opts = WaitOptions::new(timeout).with_poll_interval(poll_interval);
        let driver = Arc::clone(&self.driver);
        engine::wait_for(
            move || {
                let driver = Arc::clone(&driver);
                async move { driver.current_url().await }
            },
            &asserter,
            opts,
        )
        .await?;
        Ok(())
    }

    /// Wait until the current path (including the query string) matches.
    pub async fn wait_for_path(&self, path: impl Into<StringMatch>) -> Result<()> {
        self.wait_for_path_with(
            path,
            self.config.navigation_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Same, with an explicit deadline and poll cadence.
    pub async fn wait_for_path_with(
        &self,
        path: impl Into<StringMatch>,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<()> {
        let asserter = PropertyAsserter::new("path", path);
        let opts = WaitOptions::new(timeout).with_poll_interval(poll_interval);
        let driver = Arc::clone(&self.driver);
        engine::wait_for(
            move || {
                let driver = Arc::clone(&driver);
                async move {
                    let raw = driver.current_url().await?;
                    Ok(path_of(&raw))
                }
            },
            &asserter,
            opts,
        )
        .await?;
        Ok(())
    }
}

/// Path plus query string of a URL, e.g. `/index.html?a=1`.
fn path_of(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        // Not an absolute URL; treat the raw value as already being a path.
        Err(_) => raw.to_string(),
    }
}

/// Append query pairs to a URL, keeping any fragment at the end.
fn append_query(url: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }

    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };

    let mut target = format!("{base}{separator}{encoded}");
    if let Some(fragment) = fragment {
        target.push('#');
        target.push_str(fragment);
    }
    target
}
