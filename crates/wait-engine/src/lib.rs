//! Retrying-wait engine for browser conditions.
//!
//! Three layers, leaves first:
//!
//! - [`matchers`]: pure predicates comparing an expected value (literal or
//!   pattern) against an observed string or URL.
//! - [`asserters`]: one-shot checks with a uniform success-or-error contract,
//!   each failure classified retriable or fatal.
//! - [`engine`]: the polling loop that re-resolves a target and re-runs an
//!   asserter until the check holds, fails fatally, or times out.
//!
//! The engine never talks to the browser directly; targets are produced by a
//! caller-supplied resolver over the `driver-adapter` contract.

pub mod asserters;
pub mod engine;
pub mod errors;
pub mod matchers;

pub use asserters::{
    Asserter, CountSpec, DisplayedAsserter, ElementsNumberAsserter, ExistsAsserter,
    FuzzyStringAsserter, PropertyAsserter, StringProperty, UrlAsserter,
};
pub use engine::{wait_for, WaitOptions};
pub use errors::WaitError;
pub use matchers::{StringMatch, UrlExpectation};
