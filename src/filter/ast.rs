//! Predicate types for the filter language.

use std::fmt;

/// The comparison a single filter clause requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
}

impl TestKind {
    /// Apply this test to a string-cast haystack value and a literal needle.
    pub fn apply(&self, haystack: &str, needle: &str) -> bool {
        match self {
            TestKind::Contains => haystack.contains(needle),
            TestKind::NotContains => !haystack.contains(needle),
            TestKind::Equals => haystack == needle,
            TestKind::NotEquals => haystack != needle,
            TestKind::StartsWith => haystack.starts_with(needle),
            TestKind::NotStartsWith => !haystack.starts_with(needle),
            TestKind::EndsWith => haystack.ends_with(needle),
            TestKind::NotEndsWith => !haystack.ends_with(needle),
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Contains => write!(f, "<"),
            TestKind::NotContains => write!(f, "!<"),
            TestKind::Equals => write!(f, "="),
            TestKind::NotEquals => write!(f, "!="),
            TestKind::StartsWith => write!(f, "{{"),
            TestKind::NotStartsWith => write!(f, "!{{"),
            TestKind::EndsWith => write!(f, "}}"),
            TestKind::NotEndsWith => write!(f, "!}}"),
        }
    }
}

/// One parsed clause: test the value under `haystack` against `needle`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTest {
    pub haystack: String,
    pub needle: String,
    pub test: TestKind,
}

/// An AND-combined sequence of predicates, built once per filter string and
/// reusable across any number of records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterExpression {
    pub tests: Vec<FilterTest>,
}

impl FilterExpression {
    /// True when no clause produced a predicate. Evaluators treat an empty
    /// expression as matching nothing, not everything.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}
