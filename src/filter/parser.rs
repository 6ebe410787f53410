//! Parser for the filter language.
//!
//! A filter string is a comma-separated list of clauses (comma = AND), each
//! clause `<field><operator><value>`. The clause is split in two at the
//! first occurrence of the matched operator token: the left side is the
//! field name (possibly dotted), the right side is the literal value.

use super::ast::{FilterExpression, FilterTest, TestKind};

/// Operator tokens in match order. Each negated token is checked before the
/// bare token it contains, so `name!=x` never parses as equals.
const OPERATORS: [(&str, TestKind); 8] = [
    ("!<", TestKind::NotContains),
    ("<", TestKind::Contains),
    ("!=", TestKind::NotEquals),
    ("=", TestKind::Equals),
    ("!{", TestKind::NotStartsWith),
    ("{", TestKind::StartsWith),
    ("!}", TestKind::NotEndsWith),
    ("}", TestKind::EndsWith),
];

/// Parse a filter string into its predicates.
///
/// A clause with no recognized operator contributes no predicate; an empty
/// or entirely unrecognized string yields an empty expression. Neither is an
/// error here, callers that need to reject malformed filters must check
/// `is_empty` themselves.
pub fn classify(filter_string: &str) -> FilterExpression {
    let mut tests = Vec::new();
    for clause in filter_string.split(',') {
        match classify_clause(clause) {
            Some(test) => tests.push(test),
            None if clause.is_empty() => {}
            None => {
                tracing::debug!("Filter clause {clause:?} has no recognized operator; ignoring");
            }
        }
    }
    FilterExpression { tests }
}

fn classify_clause(clause: &str) -> Option<FilterTest> {
    for (token, kind) in OPERATORS {
        if let Some((haystack, needle)) = clause.split_once(token) {
            return Some(FilterTest {
                haystack: haystack.to_string(),
                needle: needle.to_string(),
                test: kind,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(filter: &str) -> FilterTest {
        let expr = classify(filter);
        assert_eq!(expr.tests.len(), 1, "expected one predicate from {filter:?}");
        expr.tests[0].clone()
    }

    #[test]
    fn test_equals() {
        let test = single("name=db1");
        assert_eq!(test.haystack, "name");
        assert_eq!(test.needle, "db1");
        assert_eq!(test.test, TestKind::Equals);
    }

    #[test]
    fn test_not_equals_beats_equals() {
        let test = single("name!=db1");
        assert_eq!(test.haystack, "name");
        assert_eq!(test.needle, "db1");
        assert_eq!(test.test, TestKind::NotEquals);
    }

    #[test]
    fn test_not_contains_beats_contains() {
        let test = single("name!<db");
        assert_eq!(test.test, TestKind::NotContains);
    }

    #[test]
    fn test_prefix_and_suffix_operators() {
        assert_eq!(single("name{db").test, TestKind::StartsWith);
        assert_eq!(single("name!{db").test, TestKind::NotStartsWith);
        assert_eq!(single("name}1").test, TestKind::EndsWith);
        assert_eq!(single("name!}1").test, TestKind::NotEndsWith);
    }

    #[test]
    fn test_dotted_field_name() {
        let test = single("network.ip{10.");
        assert_eq!(test.haystack, "network.ip");
        assert_eq!(test.needle, "10.");
        assert_eq!(test.test, TestKind::StartsWith);
    }

    #[test]
    fn test_comma_builds_multiple_predicates() {
        let expr = classify("a=1,b=2");
        assert_eq!(expr.tests.len(), 2);
        assert_eq!(expr.tests[0].haystack, "a");
        assert_eq!(expr.tests[1].haystack, "b");
    }

    #[test]
    fn test_split_at_first_operator_occurrence() {
        let test = single("version=1=2");
        assert_eq!(test.haystack, "version");
        assert_eq!(test.needle, "1=2");
    }

    #[test]
    fn test_unrecognized_clause_is_dropped() {
        let expr = classify("name=db1,bogus");
        assert_eq!(expr.tests.len(), 1);
    }

    #[test]
    fn test_empty_string_yields_empty_expression() {
        assert!(classify("").is_empty());
        assert!(classify("no operator here").is_empty());
    }
}
