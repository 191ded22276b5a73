//! Containment operators.
//!
//! `contains` asks whether the resolved value holds the operand;
//! `in_`/`nin` flip the sides and ask whether the resolved value is a
//! member of the operand container. The membership check is capability
//! probed per container kind: mappings answer by key lookup, sets and
//! sequences by element search, and a sequence without iterable entries
//! falls back to an index bounds check against its length.

use std::borrow::Cow;

use crate::member::Key;
use crate::object::{Kind, ObjectGraph, Scalar};
use crate::operators::Operator;

/// Capability-probed membership test.
#[must_use]
pub fn check_contains(container: &dyn ObjectGraph, needle: &Scalar) -> bool {
    match container.kind() {
        Kind::Mapping => key_probe(needle)
            .map(|key| container.get(&key).is_some())
            .unwrap_or(false),
        Kind::Set | Kind::Sequence => {
            if let Some(entries) = container.entries() {
                return entries.into_iter().any(|(_, element)| {
                    element
                        .graph()
                        .as_scalar()
                        .is_some_and(|s| s.equals(needle))
                });
            }
            match (container.len(), needle.as_index()) {
                (Some(len), Some(index)) => index < len,
                _ => false,
            }
        }
        Kind::Scalar | Kind::Opaque => false,
    }
}

fn key_probe(needle: &Scalar) -> Option<Key> {
    match needle {
        Scalar::Str(s) => Some(Key::Name(Cow::Owned(s.clone()))),
        _ => needle.as_index().map(Key::Index),
    }
}

/// The resolved value must contain the operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contains;

impl Operator for Contains {
    fn apply(&self, lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> bool {
        rhs.as_scalar()
            .is_some_and(|needle| check_contains(lhs, &needle))
    }

    fn description(&self) -> &'static str {
        "must contain"
    }

    fn negated_description(&self) -> &'static str {
        "must not contain"
    }
}

/// Creates the `contains` operator.
#[must_use]
pub const fn contains() -> Contains {
    Contains
}

/// The resolved value must be a member of the operand container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct In;

impl Operator for In {
    fn apply(&self, lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> bool {
        lhs.as_scalar()
            .is_some_and(|needle| check_contains(rhs, &needle))
    }

    fn description(&self) -> &'static str {
        "must be in"
    }

    fn negated_description(&self) -> &'static str {
        "must not be in"
    }
}

/// Creates the `in` operator.
#[must_use]
pub const fn in_() -> In {
    In
}

/// The resolved value must not be a member of the operand container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotIn;

impl Operator for NotIn {
    fn apply(&self, lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> bool {
        !In.apply(lhs, rhs)
    }

    fn description(&self) -> &'static str {
        "must not be in"
    }

    fn negated_description(&self) -> &'static str {
        "must be in"
    }
}

/// Creates the `nin` operator.
#[must_use]
pub const fn nin() -> NotIn {
    NotIn
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn mapping_contains_key() {
        let doc = json!({"a": 1, "b": 2});
        assert!(check_contains(&doc, &Scalar::Str("a".into())));
        assert!(!check_contains(&doc, &Scalar::Str("z".into())));
    }

    #[test]
    fn sequence_contains_element() {
        let doc = json!([10, 20, 30]);
        assert!(check_contains(&doc, &Scalar::Int(20)));
        assert!(!check_contains(&doc, &Scalar::Int(99)));
    }

    #[test]
    fn set_membership() {
        let mut set = HashSet::new();
        set.insert("level2".to_owned());
        assert!(check_contains(&set, &Scalar::Str("level2".into())));
        assert!(!check_contains(&set, &Scalar::Str("level3".into())));
    }

    #[test]
    fn in_flips_sides() {
        let allowed = json!(["red", "green"]);
        let value = Scalar::Str("red".into());
        assert!(in_().apply(&value, &allowed));
        assert!(!nin().apply(&value, &allowed));
        let other = Scalar::Str("blue".into());
        assert!(nin().apply(&other, &allowed));
    }
}
