//! Evaluation of filter expressions against inventory records and results.

use serde_json::Value;

use super::ast::FilterExpression;
use super::parser::classify;
use crate::records::flatten;

/// String form of a value for comparison purposes. Strings compare by their
/// contents, everything else by its JSON rendering.
fn value_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keep the inventory records matching every applicable predicate.
///
/// Each record is flattened with a `.` separator, so dotted field names in
/// the filter address nested values. Predicates naming a key the record does
/// not have are skipped for that record; a record survives only when at
/// least one predicate applied and none failed.
pub fn filter_inventory(inventory: &[Value], raw_filter: &str) -> Vec<Value> {
    let expr = classify(raw_filter);
    inventory
        .iter()
        .filter(|host| matches_record(host, &expr))
        .cloned()
        .collect()
}

fn matches_record(host: &Value, expr: &FilterExpression) -> bool {
    let Value::Object(record) = host else {
        return false;
    };
    let flattened = flatten(record, ".");
    let mut applied = 0;
    for test in &expr.tests {
        let Some(value) = flattened.get(&test.haystack) else {
            continue;
        };
        if !test.test.apply(&value_str(value), &test.needle) {
            return false;
        }
        applied += 1;
    }
    applied > 0
}

/// Keep the result values matching every predicate.
///
/// The field name of each predicate is ignored; every predicate runs
/// directly against the value itself. An empty expression matches nothing.
pub fn filter_results(results: &[Value], raw_filter: &str) -> Vec<Value> {
    let expr = classify(raw_filter);
    if expr.is_empty() {
        return Vec::new();
    }
    results
        .iter()
        .filter(|result| {
            let haystack = value_str(result);
            expr.tests
                .iter()
                .all(|test| test.test.apply(&haystack, &test.needle))
        })
        .cloned()
        .collect()
}
