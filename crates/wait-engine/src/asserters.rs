//! One-shot checks with a uniform success-or-error contract.
//!
//! An asserter packages a single check plus the wording of its failure. It is
//! constructed fresh per call and holds no state. Failures classified
//! [`WaitError::Condition`] are eligible for retry by the engine; everything
//! else aborts a wait immediately.

use crate::errors::WaitError;
use crate::matchers::{self, StringMatch, UrlExpectation};
use async_trait::async_trait;
use driver_adapter::ElementRef;

/// A reusable, described check against a target value.
#[async_trait]
pub trait Asserter<T: Send + Sync>: Send + Sync {
    async fn assert(&self, target: &T) -> Result<(), WaitError>;
}

/// Checks whether an element is, or is not, displayed.
pub struct DisplayedAsserter {
    expected: bool,
    selector: String,
}

impl DisplayedAsserter {
    pub fn new(expected: bool, selector: impl Into<String>) -> Self {
        Self {
            expected,
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl Asserter<Option<ElementRef>> for DisplayedAsserter {
    async fn assert(&self, target: &Option<ElementRef>) -> Result<(), WaitError> {
        let Some(element) = target else {
            // An absent element is vacuously not displayed.
            if self.expected {
                return Err(WaitError::Condition(format!(
                    "Element not found for selector: {}",
                    self.selector
                )));
            }
            return Ok(());
        };

        let displayed = element.is_displayed().await?;
        if displayed != self.expected {
            return Err(WaitError::Condition(format!(
                "Element {:?} should{} be displayed",
                self.selector,
                if self.expected { "" } else { "n't" }
            )));
        }
        Ok(())
    }
}

/// Checks whether an element exists.
pub struct ExistsAsserter {
    expected: bool,
    selector: String,
}

impl ExistsAsserter {
    pub fn new(expected: bool, selector: impl Into<String>) -> Self {
        Self {
            expected,
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl Asserter<Option<ElementRef>> for ExistsAsserter {
    async fn assert(&self, target: &Option<ElementRef>) -> Result<(), WaitError> {
        if target.is_some() != self.expected {
            return Err(WaitError::Condition(format!(
                "Element {:?} should{} exist",
                self.selector,
                if self.expected { "" } else { "n't" }
            )));
        }
        Ok(())
    }
}

/// Element string property a fuzzy asserter can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringProperty {
    Text,
    Value,
}

impl StringProperty {
    pub fn name(self) -> &'static str {
        match self {
            StringProperty::Text => "text",
            StringProperty::Value => "value",
        }
    }
}

/// Checks an element's text or value against a fuzzy expectation.
pub struct FuzzyStringAsserter {
    property: StringProperty,
    expected: StringMatch,
    should_match: bool,
    selector: String,
}

impl FuzzyStringAsserter {
    pub fn new(
        property: StringProperty,
        expected: impl Into<StringMatch>,
        should_match: bool,
        selector: impl Into<String>,
    ) -> Self {
        Self {
            property,
            expected: expected.into(),
            should_match,
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl Asserter<ElementRef> for FuzzyStringAsserter {
    async fn assert(&self, target: &ElementRef) -> Result<(), WaitError> {
        let actual = match self.property {
            StringProperty::Text => target.text().await?,
            StringProperty::Value => target.value().await?,
        };

        if matchers::fuzzy(&self.expected, &actual) != self.should_match {
            let property = self.property.name();
            return Err(WaitError::Condition(format!(
                "{} should {}have {}\n- needle: {}\n- {}: {:?}",
                self.selector,
                if self.should_match { "" } else { "not " },
                property,
                self.expected.stringify(),
                property,
                actual
            )));
        }
        Ok(())
    }
}

/// Expected element count; a bare number is shorthand for `equal`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountSpec {
    pub equal: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl CountSpec {
    pub fn exactly(count: usize) -> Self {
        Self {
            equal: Some(count),
            ..Self::default()
        }
    }

    pub fn at_least(count: usize) -> Self {
        Self {
            min: Some(count),
            ..Self::default()
        }
    }

    pub fn at_most(count: usize) -> Self {
        Self {
            max: Some(count),
            ..Self::default()
        }
    }
}

impl From<usize> for CountSpec {
    fn from(count: usize) -> Self {
        CountSpec::exactly(count)
    }
}

/// Checks how many elements a selector matched.
///
/// Count mismatches are fatal, not retriable: the check runs once per call
/// instead of through the polling path.
pub struct ElementsNumberAsserter {
    spec: CountSpec,
    selector: String,
}

impl ElementsNumberAsserter {
    pub fn new(spec: impl Into<CountSpec>, selector: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl Asserter<Vec<ElementRef>> for ElementsNumberAsserter {
    async fn assert(&self, target: &Vec<ElementRef>) -> Result<(), WaitError> {
        let found = target.len();
        if let Some(min) = self.spec.min {
            if found < min {
                return Err(WaitError::Assertion(format!(
                    "selector {:?} should have at least {} elements - actually found {}",
                    self.selector, min, found
                )));
            }
        }
        if let Some(max) = self.spec.max {
            if found > max {
                return Err(WaitError::Assertion(format!(
                    "selector {:?} should have at most {} elements - actually found {}",
                    self.selector, max, found
                )));
            }
        }
        if let Some(equal) = self.spec.equal {
            if found != equal {
                return Err(WaitError::Assertion(format!(
                    "selector {:?} should match {} elements - actually found {}",
                    self.selector, equal, found
                )));
            }
        }
        Ok(())
    }
}

/// Checks the current URL against a URL expectation.
pub struct UrlAsserter {
    expectation: UrlExpectation,
}

impl UrlAsserter {
    pub fn new(expectation: UrlExpectation) -> Self {
        Self { expectation }
    }
}

#[async_trait]
impl Asserter<String> for UrlAsserter {
    async fn assert(&self, target: &String) -> Result<(), WaitError> {
        if !matchers::url(&self.expectation, target) {
            return Err(WaitError::Condition(format!("Url did not match {target}")));
        }
        Ok(())
    }
}

/// Checks a named string property (e.g. the current path) for a strict match.
pub struct PropertyAsserter {
    name: &'static str,
    expected: StringMatch,
}

impl PropertyAsserter {
    pub fn new(name: &'static str, expected: impl Into<StringMatch>) -> Self {
        Self {
            name,
            expected: expected.into(),
        }
    }
}

#[async_trait]
impl Asserter<String> for PropertyAsserter {
    async fn assert(&self, target: &String) -> Result<(), WaitError> {
        if !matchers::exact(&self.expected, target) {
            return Err(WaitError::Condition(format!(
                "Timed out waiting for {} {}. Last value was: {:?}",
                self.name,
                self.expected.describe(),
                target
            )));
        }
        Ok(())
    }
}
