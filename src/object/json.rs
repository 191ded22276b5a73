//! `serde_json::Value` as a first-class dynamic object graph.
//!
//! JSON documents are the primary fully-dynamic input: objects are
//! mappings, arrays are sequences, everything else is a scalar leaf.

use std::borrow::Cow;

use serde_json::Value;

use crate::member::Key;
use crate::object::{Entries, GraphRef, Kind, ObjectGraph, Scalar};

impl ObjectGraph for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Array(_) => Kind::Sequence,
            Value::Object(_) => Kind::Mapping,
            _ => Kind::Scalar,
        }
    }

    fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
        match (self, key) {
            (Value::Object(map), Key::Name(name)) => {
                map.get(name.as_ref()).map(|v| GraphRef::Borrowed(v))
            }
            (Value::Array(items), Key::Index(i)) => {
                items.as_slice().get(*i).map(|v| GraphRef::Borrowed(v))
            }
            _ => None,
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            Value::String(s) => Some(s.len()),
            _ => None,
        }
    }

    fn entries(&self) -> Option<Entries<'_>> {
        match self {
            Value::Array(items) => Some(Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Key::Index(i), GraphRef::Borrowed(v))),
            )),
            Value::Object(map) => Some(Box::new(map.iter().map(|(k, v)| {
                (Key::Name(Cow::Owned(k.clone())), GraphRef::Borrowed(v))
            }))),
            _ => None,
        }
    }

    fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Scalar::Uint(u))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            Value::String(s) => Some(Scalar::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_lookup() {
        let doc = json!({"user": {"age": 30}});
        // fully qualified: Value has an inherent `get` of its own
        let user = ObjectGraph::get(&doc, &Key::Name("user".into())).unwrap();
        let age = user.graph().get(&Key::Name("age".into())).unwrap();
        assert_eq!(age.graph().as_scalar(), Some(Scalar::Int(30)));
    }

    #[test]
    fn array_lookup_and_kind() {
        let doc = json!([1, 2, 3]);
        assert_eq!(doc.kind(), Kind::Sequence);
        assert!(doc.supports_key(&Key::Index(0)));
        assert!(!doc.supports_key(&Key::Name("x".into())));
        assert!(ObjectGraph::get(&doc, &Key::Index(5)).is_none());
    }

    #[test]
    fn entries_enumerate_containers() {
        let doc = json!({"a": 1, "b": 2});
        let keys: Vec<_> = doc.entries().unwrap().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![Key::Name("a".into()), Key::Name("b".into())]
        );
    }

    #[test]
    fn number_scalars() {
        assert_eq!(json!(5).as_scalar(), Some(Scalar::Int(5)));
        assert_eq!(json!(u64::MAX).as_scalar(), Some(Scalar::Uint(u64::MAX)));
        assert_eq!(json!(1.5).as_scalar(), Some(Scalar::Float(1.5)));
    }
}
