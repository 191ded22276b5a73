//! End-to-end engine behavior against plain collections, JSON documents
//! and a custom object type with parameterized accessors.

use std::collections::{HashMap, HashSet};

use scrutiny::prelude::*;
use serde_json::json;

fn nested_sets() -> HashMap<String, HashSet<String>> {
    let mut inner = HashSet::new();
    inner.insert("level2".to_owned());
    let mut outer = HashMap::new();
    outer.insert("level1".to_owned(), inner);
    outer
}

#[test]
fn existence_through_nested_containers() {
    let doc = nested_sets();
    assert_eq!(m("level1").key("level2").exists(true).apply(&doc), Status::Ok);
    assert_eq!(
        m("level1").key("level3").exists(true).apply(&doc),
        Status::Fail
    );
    assert_eq!(
        m("level1").key("level3").exists(false).apply(&doc),
        Status::Ok
    );
}

#[test]
fn infeasible_paths_are_vacuously_ok() {
    let doc = json!({"count": 5});
    // indexing into a scalar can never apply to this shape
    let rule = m("count").idx(0).is(eq(), 1);
    assert_eq!(rule.apply(&doc), Status::Ok);
    // and stays vacuous even under the strictest configuration
    let strict = AdapterConfig::default()
        .unknown_member(UnknownMemberPolicy::Abort)
        .check_member_exists(true);
    assert_eq!(rule.apply_with_config(&doc, strict), Status::Ok);
}

#[test]
fn cross_type_numeric_comparison() {
    let doc = json!({"offset": -5});
    assert_eq!(m("offset").is(lt(), 0u64).apply(&doc), Status::Ok);
    assert_eq!(m("offset").is(gte(), 0u64).apply(&doc), Status::Fail);
    let doc = json!({"ratio": 0.5});
    assert_eq!(m("ratio").is(lt(), 1).apply(&doc), Status::Ok);
}

// A structure the engine can only reach through accessors.
struct Widget;

impl ObjectGraph for Widget {
    fn kind(&self) -> Kind {
        Kind::Opaque
    }

    fn accessor_arity(&self, name: &str) -> Option<usize> {
        match name {
            "id" => Some(0),
            "child" => Some(1),
            _ => None,
        }
    }

    fn invoke(&self, name: &str, args: &[Scalar]) -> Invoked<'_> {
        match (name, args) {
            ("id", []) => Invoked::Value(GraphRef::owned(Scalar::Int(7))),
            ("child", [Scalar::Int(n)]) => Invoked::Value(GraphRef::owned(Scalar::Int(n + 1))),
            ("child", [_]) => Invoked::BadArgs,
            _ => Invoked::Unsupported,
        }
    }
}

#[test]
fn parameterized_accessors() {
    let widget = Widget;
    let rule = Member::root().invoke("child").arg(20).is(eq(), 21);
    assert_eq!(rule.apply(&widget), Status::Ok);

    let rule = Member::root().invoke("id").is(eq(), 7);
    assert_eq!(rule.apply(&widget), Status::Ok);

    // a string argument does not convert; the path is infeasible
    let rule = Member::root().invoke("child").arg("x").is(eq(), 21);
    assert_eq!(rule.apply(&widget), Status::Ok);

    // unfinished call produces no value
    let rule = Member::root().invoke("child").is(eq(), 21);
    assert_eq!(rule.apply(&widget), Status::Ok);
}

#[test]
fn one_validator_embedded_in_two_outer_trees() {
    let inner = m("field1").exists(true);

    let outer_a = all_of![inner.clone(), m("other").exists(false)];
    assert_eq!(outer_a.apply(&json!({"field1": 1})), Status::Ok);
    assert_eq!(outer_a.apply(&json!({"field2": 1})), Status::Fail);

    // the same tree again, this time scoped under a wrapper member
    let outer_b = m("wrapper").nest(inner.clone());
    assert_eq!(outer_b.apply(&json!({"wrapper": {"field1": 1}})), Status::Ok);
    assert_eq!(
        outer_b.apply(&json!({"wrapper": {"field2": 1}})),
        Status::Fail
    );

    // embedding did not disturb the original
    assert_eq!(inner.apply(&json!({"field1": 1})), Status::Ok);
}

#[test]
fn evaluation_is_idempotent() {
    let doc = json!({"age": 30, "tags": ["a", "b"]});
    let rule = all_of![
        m("age").is(gte(), 18),
        m("tags").size().is(eq(), 2u64),
        m("missing").is(eq(), 1),
    ];
    let first = rule.apply(&doc);
    let second = rule.apply(&doc);
    assert_eq!(first, Status::Ok);
    assert_eq!(first, second);
}

#[test]
fn logical_folds_short_circuit() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let doc = json!({"a": 1});
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = |calls: &Arc<AtomicUsize>| {
        let calls = Arc::clone(calls);
        Operand::lazy(move || {
            calls.fetch_add(1, Ordering::Relaxed);
            Scalar::Int(1)
        })
    };

    // AND stops at the first failure: the third leaf is never evaluated
    let rule = all_of![
        m("a").is(eq(), counted(&calls)),
        m("a").is(eq(), 2),
        m("a").is(eq(), counted(&calls)),
    ];
    assert_eq!(rule.apply(&doc), Status::Fail);
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    // OR stops at the first success
    calls.store(0, Ordering::Relaxed);
    let rule = any_of![
        m("a").is(eq(), counted(&calls)),
        m("a").is(eq(), counted(&calls)),
    ];
    assert_eq!(rule.apply(&doc), Status::Ok);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn operand_kinds() {
    let doc = json!({"low": 1, "high": 5, "color": "red"});

    // another member of the same object
    assert_eq!(m("high").is(gt(), m("low")).apply(&doc), Status::Ok);

    // a container literal
    let allowed = Operand::object(json!(["red", "green"]));
    assert_eq!(m("color").is(in_(), allowed).apply(&doc), Status::Ok);
    let allowed = Operand::object(json!(["blue"]));
    assert_eq!(m("color").is(nin(), allowed).apply(&doc), Status::Ok);

    // the same member of a reference object
    let sample = json!({"high": 5});
    assert_eq!(
        m("high").is(eq(), Operand::sample(sample)).apply(&doc),
        Status::Ok
    );
}

#[test]
fn regex_and_string_rules() {
    let doc = json!({"email": "user@example.com", "name": "ada"});
    let rule = all_of![
        m("email").is(matches_str(r".+@.+\..+").unwrap(), Scalar::Null),
        m("name").size().is(gte(), 2u64),
    ];
    assert_eq!(rule.apply(&doc), Status::Ok);
}

#[test]
fn contains_on_documents() {
    let doc = json!({"tags": ["a", "b"], "limits": {"cpu": 1}});
    assert_eq!(m("tags").is(contains(), "a").apply(&doc), Status::Ok);
    assert_eq!(m("limits").is(contains(), "cpu").apply(&doc), Status::Ok);
    assert_eq!(m("tags").is(contains(), "z").apply(&doc), Status::Fail);
}
