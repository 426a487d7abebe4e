//! Pure comparison predicates between expected and observed values.
//!
//! No I/O and no state: every function here is deterministic over its inputs.

use regex::Regex;
use std::collections::HashMap;
use url::Url;

/// Expected value for a string comparison: a literal or a pattern.
///
/// The closed enum is the full set of legal expectations; there is no
/// "some other type" usage error to classify at runtime.
#[derive(Clone, Debug)]
pub enum StringMatch {
    Exact(String),
    Pattern(Regex),
}

impl StringMatch {
    /// Render the expectation the way assertion messages quote a needle:
    /// literals JSON-quoted, patterns as `/source/`.
    pub fn stringify(&self) -> String {
        match self {
            StringMatch::Exact(literal) => format!("{literal:?}"),
            StringMatch::Pattern(pattern) => format!("/{}/", pattern.as_str()),
        }
    }

    /// Render the expectation unquoted, for prose-style messages.
    pub fn describe(&self) -> String {
        match self {
            StringMatch::Exact(literal) => literal.clone(),
            StringMatch::Pattern(pattern) => format!("/{}/", pattern.as_str()),
        }
    }
}

impl From<&str> for StringMatch {
    fn from(literal: &str) -> Self {
        StringMatch::Exact(literal.to_string())
    }
}

impl From<String> for StringMatch {
    fn from(literal: String) -> Self {
        StringMatch::Exact(literal)
    }
}

impl From<Regex> for StringMatch {
    fn from(pattern: Regex) -> Self {
        StringMatch::Pattern(pattern)
    }
}

/// Strict comparison: literals must be equal, patterns must match.
pub fn exact(expected: &StringMatch, actual: &str) -> bool {
    match expected {
        StringMatch::Exact(literal) => literal == actual,
        StringMatch::Pattern(pattern) => pattern.is_match(actual),
    }
}

/// Containment comparison: a literal expectation must appear somewhere in the
/// observed value. An empty literal only matches an empty observed value,
/// since containment would trivially accept anything.
pub fn fuzzy(expected: &StringMatch, actual: &str) -> bool {
    match expected {
        StringMatch::Exact(literal) if literal.is_empty() => actual.is_empty(),
        StringMatch::Exact(literal) => actual.contains(literal.as_str()),
        StringMatch::Pattern(pattern) => pattern.is_match(actual),
    }
}

/// URL expectation: the URL itself plus per-key query expectations.
#[derive(Clone, Debug)]
pub struct UrlExpectation {
    pub url: StringMatch,
    pub query: Vec<(String, StringMatch)>,
}

impl UrlExpectation {
    pub fn new(url: impl Into<StringMatch>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<StringMatch>,
    ) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Component-wise URL comparison.
///
/// A pattern expectation matches against the whole observed URL and skips all
/// query checks. A literal expectation is parsed into components; absent
/// components (a path-only expectation has no scheme or host) match anything,
/// present ones must match exactly. Query expectations embedded in the
/// expected URL merge with the explicit ones (explicit wins on a duplicate
/// key); every expected key must match the observed value for that key, and
/// observed keys nobody asked about are ignored.
pub fn url(expected: &UrlExpectation, actual: &str) -> bool {
    let raw_expected = match &expected.url {
        StringMatch::Pattern(_) => return exact(&expected.url, actual),
        StringMatch::Exact(raw) => raw,
    };

    let (expected_parts, actual_parts) = match (UrlParts::parse(raw_expected), UrlParts::parse(actual)) {
        (Some(e), Some(a)) => (e, a),
        _ => return false,
    };

    let mut expected_query: Vec<(String, StringMatch)> = expected_parts
        .query
        .iter()
        .map(|(key, value)| (key.clone(), StringMatch::Exact(value.clone())))
        .collect();
    for (key, matcher) in &expected.query {
        match expected_query.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = matcher.clone(),
            None => expected_query.push((key.clone(), matcher.clone())),
        }
    }

    let basics_equal = component_matches(&expected_parts.scheme, &actual_parts.scheme)
        && component_matches(&expected_parts.host, &actual_parts.host)
        && expected_parts.path == actual_parts.path
        && component_matches(&expected_parts.fragment, &actual_parts.fragment);

    let query_equal = expected_query.iter().all(|(key, matcher)| {
        actual_parts
            .query
            .get(key)
            .is_some_and(|value| exact(matcher, value))
    });

    basics_equal && query_equal
}

/// An absent expectation matches anything; a present one must be equal.
fn component_matches(expected: &Option<String>, actual: &Option<String>) -> bool {
    match expected {
        None => true,
        Some(value) => actual.as_ref() == Some(value),
    }
}

/// URL broken into the components the matcher compares.
#[derive(Debug)]
struct UrlParts {
    scheme: Option<String>,
    host: Option<String>,
    path: String,
    fragment: Option<String>,
    query: HashMap<String, String>,
}

impl UrlParts {
    /// Parse an absolute or path-relative URL. Relative URLs carry no scheme
    /// or host, so those components stay unconstrained.
    fn parse(raw: &str) -> Option<UrlParts> {
        match Url::parse(raw) {
            Ok(parsed) => Some(Self::from_url(&parsed, true)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse("http://relative.invalid/").ok()?;
                let joined = base.join(raw).ok()?;
                Some(Self::from_url(&joined, false))
            }
            Err(_) => None,
        }
    }

    fn from_url(parsed: &Url, absolute: bool) -> UrlParts {
        let host = parsed.host_str().map(|host| match parsed.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        });
        UrlParts {
            scheme: absolute.then(|| parsed.scheme().to_string()),
            host: if absolute { host } else { None },
            path: parsed.path().to_string(),
            fragment: parsed.fragment().map(str::to_string),
            query: parsed.query_pairs().into_owned().collect(),
        }
    }
}
