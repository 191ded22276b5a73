//! Rendered failure descriptions.

use pretty_assertions::assert_eq;
use scrutiny::prelude::*;
use serde_json::json;

#[test]
fn passing_validation_reports_nothing() {
    let doc = json!({"age": 30});
    assert!(m("age").is(gte(), 18).apply_reporting(&doc).is_ok());
}

#[test]
fn leaf_failure_message() {
    let doc = json!({"age": 10});
    let err = m("age").is(gte(), 18).apply_reporting(&doc).unwrap_err();
    assert_eq!(err.status, Status::Fail);
    assert_eq!(err.message, "age must be greater than or equal to 18");
    assert_eq!(
        err.to_string(),
        "validation failed: age must be greater than or equal to 18"
    );
}

#[test]
fn property_failure_message() {
    let doc = json!({"tags": []});
    let err = m("tags")
        .size()
        .is(gte(), 1u64)
        .apply_reporting(&doc)
        .unwrap_err();
    assert_eq!(err.message, "tags.size must be greater than or equal to 1");
}

#[test]
fn existence_failure_message() {
    let doc = json!({});
    let err = m("id").exists(true).apply_reporting(&doc).unwrap_err();
    assert_eq!(err.message, "id must exist");
}

#[test]
fn or_failures_are_grouped() {
    let doc = json!({"a": 1, "b": 2});
    let rule = any_of![m("a").is(eq(), 9), m("b").is(eq(), 9)];
    let err = rule.apply_reporting(&doc).unwrap_err();
    assert_eq!(
        err.message,
        "(a must be equal to 9 OR b must be equal to 9)"
    );
}

#[test]
fn and_reports_only_the_branch_that_failed() {
    let doc = json!({"a": 9, "b": 2});
    let rule = all_of![m("a").is(eq(), 9), m("b").is(eq(), 9), m("a").is(eq(), 1)];
    let err = rule.apply_reporting(&doc).unwrap_err();
    // the fold stops at the first failure
    assert_eq!(err.message, "b must be equal to 9");
}

#[test]
fn element_aggregation_failure_names_the_concrete_element() {
    let doc = json!({"scores": [1, -2]});
    let err = m("scores")
        .all()
        .is(gte(), 0)
        .apply_reporting(&doc)
        .unwrap_err();
    assert_eq!(
        err.message,
        "for each element of scores.ALL: scores[1] must be greater than or equal to 0"
    );
}

#[test]
fn empty_container_any_failure_still_names_the_member() {
    let doc = json!({"items": []});
    let err = m("items")
        .any()
        .is(gte(), 0)
        .apply_reporting(&doc)
        .unwrap_err();
    assert_eq!(err.status, Status::Fail);
    assert_eq!(
        err.message,
        "no element of items.ANY satisfies the condition"
    );
}

#[test]
fn other_member_failure_message() {
    let doc = json!({"password": "a", "confirm": "b"});
    let err = m("confirm")
        .is(eq(), m("password"))
        .apply_reporting(&doc)
        .unwrap_err();
    assert_eq!(err.message, "confirm must be equal to password");
}
