//! Element lookup, single-shot assertions, and element waits.

use crate::browser::Browser;
use crate::errors::{BrowserError, Result};
use driver_adapter::{DriverError, ElementRef};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use wait_engine::{
    engine, Asserter, CountSpec, DisplayedAsserter, ElementsNumberAsserter, ExistsAsserter,
    FuzzyStringAsserter, StringMatch, StringProperty, WaitError, WaitOptions,
};

impl Browser {
    /// First element matching `selector`; fails when absent.
    pub async fn get_element(&self, selector: &str) -> Result<ElementRef> {
        match self.driver.element_by_css_or_null(selector).await? {
            Some(element) => Ok(element),
            None => Err(WaitError::Assertion(format!(
                "Element not found at selector: {selector}"
            ))
            .into()),
        }
    }

    /// First element matching `selector`, or `None`.
    pub async fn get_element_or_null(&self, selector: &str) -> Result<Option<ElementRef>> {
        Ok(self.driver.element_by_css_or_null(selector).await?)
    }

    /// All elements matching `selector`.
    pub async fn get_elements(&self, selector: &str) -> Result<Vec<ElementRef>> {
        Ok(self.driver.elements_by_css(selector).await?)
    }

    /// Click the element matching `selector`, which must be unique.
    pub async fn click_on(&self, selector: &str) -> Result<()> {
        let elements = self.driver.elements_by_css(selector).await?;
        match elements.as_slice() {
            [] => Err(BrowserError::Usage(format!(
                "selector {selector:?} matched no element."
            ))),
            [element] => {
                element.click().await?;
                Ok(())
            }
            _ => Err(BrowserError::Usage(format!(
                "selector {selector:?} matched more than 1 element. \
                 Use .click_on_all() or a more specific selector instead."
            ))),
        }
    }

    /// Click every element matching `selector`; matching nothing is fine.
    pub async fn click_on_all(&self, selector: &str) -> Result<()> {
        for element in self.driver.elements_by_css(selector).await? {
            element.click().await?;
        }
        Ok(())
    }

    // Single-shot assertions. These run the same asserters the waits poll
    // with, but exactly once.

    /// Assert the `selector` element exists and is displayed.
    pub async fn assert_element_is_displayed(&self, selector: &str) -> Result<()> {
        let target = self.driver.element_by_css_or_null(selector).await?;
        DisplayedAsserter::new(true, selector).assert(&target).await?;
        Ok(())
    }

    /// Assert the `selector` element is absent or hidden.
    pub async fn assert_element_not_displayed(&self, selector: &str) -> Result<()> {
        let target = self.driver.element_by_css_or_null(selector).await?;
        DisplayedAsserter::new(false, selector).assert(&target).await?;
        Ok(())
    }

    /// Assert at least one element matches `selector`.
    pub async fn assert_element_exists(&self, selector: &str) -> Result<()> {
        let target = self.driver.element_by_css_or_null(selector).await?;
        ExistsAsserter::new(true, selector).assert(&target).await?;
        Ok(())
    }

    /// Assert no element matches `selector`.
    pub async fn assert_element_doesnt_exist(&self, selector: &str) -> Result<()> {
        let target = self.driver.element_by_css_or_null(selector).await?;
        ExistsAsserter::new(false, selector).assert(&target).await?;
        Ok(())
    }

    /// Assert the unique `selector` element's text contains `expected`.
    /// Returns the element so callers can chain further operations.
    pub async fn assert_element_has_text(
        &self,
        selector: &str,
        expected: impl Into<StringMatch>,
    ) -> Result<ElementRef> {
        self.assert_fuzzy(selector, StringProperty::Text, expected.into(), true)
            .await
    }

    /// Assert the unique `selector` element's text does not contain `expected`.
    pub async fn assert_element_lacks_text(
        &self,
        selector: &str,
        expected: impl Into<StringMatch>,
    ) -> Result<ElementRef> {
        self.assert_fuzzy(selector, StringProperty::Text, expected.into(), false)
            .await
    }

    /// Assert the unique `selector` element's value contains `expected`.
    pub async fn assert_element_has_value(
        &self,
        selector: &str,
        expected: impl Into<StringMatch>,
    ) -> Result<ElementRef> {
        self.assert_fuzzy(selector, StringProperty::Value, expected.into(), true)
            .await
    }

    /// Assert the unique `selector` element's value does not contain `expected`.
    pub async fn assert_element_lacks_value(
        &self,
        selector: &str,
        expected: impl Into<StringMatch>,
    ) -> Result<ElementRef> {
        self.assert_fuzzy(selector, StringProperty::Value, expected.into(), false)
            .await
    }

    /// Assert attribute values on the unique `selector` element.
    pub async fn assert_element_has_attributes(
        &self,
        selector: &str,
        expected: &[(&str, &str)],
    ) -> Result<ElementRef> {
        let element = self.unique_element(selector).await?;
        for (name, value) in expected {
            let actual = element.attribute(name).await?;
            if actual.as_deref() != Some(*value) {
                let actual_text = match &actual {
                    Some(text) => format!("{text:?}"),
                    None => "null".to_string(),
                };
                return Err(WaitError::Assertion(format!(
                    "Assertion failed: attribute {name}\nExpected: {value:?}\nActually: {actual_text}"
                ))
                .into());
            }
        }
        Ok(element)
    }

    /// Assert how many elements match `selector`; returns them.
    ///
    /// The count is checked once, not polled: a count that only becomes right
    /// later will not be waited for.
    pub async fn assert_elements_number(
        &self,
        selector: &str,
        spec: impl Into<CountSpec>,
    ) -> Result<Vec<ElementRef>> {
        let elements = self.driver.elements_by_css(selector).await?;
        ElementsNumberAsserter::new(spec.into(), selector)
            .assert(&elements)
            .await?;
        Ok(elements)
    }

    // Element waits. Each re-resolves the selector on every poll.

    /// Wait until `selector` resolves to a displayed element.
    pub async fn wait_for_element_displayed(&self, selector: &str) -> Result<ElementRef> {
        self.wait_for_element_displayed_within(selector, self.config.element_timeout())
            .await
    }

    /// Wait until `selector` resolves to a displayed element, with an
    /// explicit deadline.
    pub async fn wait_for_element_displayed_within(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<ElementRef> {
        debug!(selector, ?timeout, "waiting for element to be displayed");
        let opts = WaitOptions::new(timeout).with_poll_interval(self.config.poll_interval());
        let asserter = DisplayedAsserter::new(true, selector);
        let found = engine::wait_for(self.element_resolver(selector), &asserter, opts).await?;
        require_present(found)
    }

    /// Wait until `selector` is absent or hidden. Returns the hidden element
    /// when one is still attached.
    pub async fn wait_for_element_not_displayed(
        &self,
        selector: &str,
    ) -> Result<Option<ElementRef>> {
        self.wait_for_element_not_displayed_within(selector, self.config.element_timeout())
            .await
    }

    /// Same, with an explicit deadline.
    pub async fn wait_for_element_not_displayed_within(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<ElementRef>> {
        debug!(selector, ?timeout, "waiting for element to not be displayed");
        let opts = WaitOptions::new(timeout).with_poll_interval(self.config.poll_interval());
        let asserter = DisplayedAsserter::new(false, selector);
        let found = engine::wait_for(self.element_resolver(selector), &asserter, opts).await?;
        Ok(found)
    }

    /// Wait until an element matching `selector` is attached to the document.
    pub async fn wait_for_element_exist(&self, selector: &str) -> Result<ElementRef> {
        self.wait_for_element_exist_with(
            selector,
            self.config.element_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Same, with an explicit deadline and poll cadence.
    pub async fn wait_for_element_exist_with(
        &self,
        selector: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<ElementRef> {
        debug!(selector, ?timeout, "waiting for element to exist");
        let opts = WaitOptions::new(timeout).with_poll_interval(poll_interval);
        let asserter = ExistsAsserter::new(true, selector);
        let found = engine::wait_for(self.element_resolver(selector), &asserter, opts).await?;
        require_present(found)
    }

    /// Wait until no element matches `selector`.
    pub async fn wait_for_element_not_exist(&self, selector: &str) -> Result<()> {
        self.wait_for_element_not_exist_with(
            selector,
            self.config.element_timeout(),
            self.config.poll_interval(),
        )
        .await
    }

    /// Same, with an explicit deadline and poll cadence.
    pub async fn wait_for_element_not_exist_with(
        &self,
        selector: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<()> {
        debug!(selector, ?timeout, "waiting for element to not exist");
        let opts = WaitOptions::new(timeout).with_poll_interval(poll_interval);
        let asserter = ExistsAsserter::new(false, selector);
        engine::wait_for(self.element_resolver(selector), &asserter, opts).await?;
        Ok(())
    }

    /// Target resolver for element waits: re-queries the live document on
    /// every poll so a re-rendered element is picked up under its new handle.
    fn element_resolver(
        &self,
        selector: &str,
    ) -> impl FnMut() -> Pin<Box<dyn Future<Output = std::result::Result<Option<ElementRef>, DriverError>> + Send>>
    {
        let driver = Arc::clone(&self.driver);
        let selector = selector.to_string();
        move || {
            let driver = Arc::clone(&driver);
            let selector = selector.clone();
            Box::pin(async move { driver.element_by_css_or_null(&selector).await })
        }
    }

    /// Resolve `selector` to exactly one element for the fuzzy assertions.
    async fn unique_element(&self, selector: &str) -> Result<ElementRef> {
        let mut elements = self.driver.elements_by_css(selector).await?;
        match elements.len() {
            0 => Err(WaitError::Condition(format!(
                "Element not found for selector: {selector}"
            ))
            .into()),
            1 => Ok(elements.swap_remove(0)),
            hits => Err(WaitError::Assertion(format!(
                "Selector {selector} has {hits} hits on the page, assertions require unique elements"
            ))
            .into()),
        }
    }

    async fn assert_fuzzy(
        &self,
        selector: &str,
        property: StringProperty,
        expected: StringMatch,
        should_match: bool,
    ) -> Result<ElementRef> {
        let element = self.unique_element(selector).await?;
        FuzzyStringAsserter::new(property, expected, should_match, selector)
            .assert(&element)
            .await?;
        Ok(element)
    }
}

/// A positive wait resolved without an element; the asserter contract rules
/// this out, so surface it as a driver protocol violation.
fn require_present(found: Option<ElementRef>) -> Result<ElementRef> {
    found.ok_or_else(|| {
        BrowserError::from(DriverError::protocol(
            "wait resolved successfully without an element",
        ))
    })
}
