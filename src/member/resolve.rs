//! Member path resolution.
//!
//! Resolution folds left over a key sequence, probing capabilities at each
//! step, and distinguishes three outcomes:
//!
//! - [`Found::Value`] — the path resolved to a node;
//! - [`Found::Missing`] — every step was feasible for the types involved,
//!   but some key is absent on this particular object (a map without the
//!   key, an index out of range); the adapter's unknown-member policy
//!   decides what that means;
//! - [`Found::Infeasible`] — some step can never resolve on the reached
//!   type (a name into a sequence, a property the type lacks, an argument
//!   the accessor rejects); checks over such paths are vacuous and the
//!   member-access code past that step is never exercised.
//!
//! The walk is continuation-passing so intermediate owned nodes (property
//! results, accessor returns) stay alive exactly as long as the rest of
//! the walk needs them.

use crate::member::Key;
use crate::object::{Entries, GraphRef, Invoked, Kind, ObjectGraph, Scalar};

/// Outcome of resolving a member path against one object.
pub enum Found<'a> {
    /// The node the path resolved to.
    Value(&'a dyn ObjectGraph),
    /// Type-feasible path, absent on this object.
    Missing,
    /// The path cannot apply to this object's type.
    Infeasible,
}

/// Resolves `keys` against `object` and hands the outcome to `f`.
///
/// Aggregation markers are not resolvable here; the element-aggregation
/// engine splits them out before resolution. Hitting one yields
/// [`Found::Infeasible`].
pub fn with_member<R>(
    object: &dyn ObjectGraph,
    keys: &[Key],
    f: impl FnOnce(Found<'_>) -> R,
) -> R {
    walk(object, keys, None, f)
}

/// Runtime existence check. Infeasible paths count as absent.
pub fn exists(object: &dyn ObjectGraph, keys: &[Key]) -> bool {
    with_member(object, keys, |found| matches!(found, Found::Value(_)))
}

struct PendingCall<'k> {
    name: &'k str,
    arity: usize,
    args: Vec<Scalar>,
}

fn walk<'k, R, F>(
    current: &dyn ObjectGraph,
    keys: &'k [Key],
    pending: Option<PendingCall<'k>>,
    f: F,
) -> R
where
    F: FnOnce(Found<'_>) -> R,
{
    let Some((key, rest)) = keys.split_first() else {
        // An accessor still waiting for arguments has produced no value.
        return if pending.is_some() {
            f(Found::Infeasible)
        } else {
            f(Found::Value(current))
        };
    };

    if let Some(mut call) = pending {
        return match key {
            Key::Arg(value) => {
                call.args.push(value.clone());
                if call.args.len() == call.arity {
                    match current.invoke(call.name, &call.args) {
                        Invoked::Value(node) => descend(node, rest, f),
                        Invoked::Missing => f(Found::Missing),
                        Invoked::BadArgs | Invoked::Unsupported => f(Found::Infeasible),
                    }
                } else {
                    walk(current, rest, Some(call), f)
                }
            }
            // Anything but an argument inside a call is malformed; the
            // builder cannot produce it, joined paths could.
            _ => f(Found::Infeasible),
        };
    }

    match key {
        Key::Name(_) | Key::Index(_) => {
            if !current.supports_key(key) {
                return f(Found::Infeasible);
            }
            match current.get(key) {
                Some(node) => descend(node, rest, f),
                None => f(Found::Missing),
            }
        }
        Key::KeyOf(scalar) => {
            let Some(probe) = key_for_scalar(scalar) else {
                return f(Found::Infeasible);
            };
            if !current.supports_key(&probe) {
                f(Found::Infeasible)
            } else if current.get(&probe).is_some() {
                descend(GraphRef::owned(scalar.clone()), rest, f)
            } else {
                f(Found::Missing)
            }
        }
        Key::PairOf(scalar) => {
            let Some(probe) = key_for_scalar(scalar) else {
                return f(Found::Infeasible);
            };
            if !current.supports_key(&probe) {
                return f(Found::Infeasible);
            }
            match current.get(&probe) {
                Some(node) => descend(
                    GraphRef::owned(PairGraph {
                        key: scalar.clone(),
                        value: node,
                    }),
                    rest,
                    f,
                ),
                None => f(Found::Missing),
            }
        }
        Key::Prop(prop) => match prop.read(current) {
            Some(node) => descend(node, rest, f),
            None => f(Found::Infeasible),
        },
        Key::Accessor(name) => match current.accessor_arity(name) {
            None => f(Found::Infeasible),
            Some(0) => match current.invoke(name, &[]) {
                Invoked::Value(node) => descend(node, rest, f),
                Invoked::Missing => f(Found::Missing),
                Invoked::BadArgs | Invoked::Unsupported => f(Found::Infeasible),
            },
            Some(arity) => walk(
                current,
                rest,
                Some(PendingCall {
                    name: name.as_ref(),
                    arity,
                    args: Vec::new(),
                }),
                f,
            ),
        },
        // A stray argument or an unexpanded aggregation marker.
        Key::Arg(_) | Key::All(_) | Key::Any(_) | Key::ArgsAll(_) | Key::ArgsAny(_) => {
            f(Found::Infeasible)
        }
    }
}

fn descend<'k, R, F>(node: GraphRef<'_>, rest: &'k [Key], f: F) -> R
where
    F: FnOnce(Found<'_>) -> R,
{
    match node {
        GraphRef::Borrowed(graph) => walk(graph, rest, None, f),
        GraphRef::Owned(boxed) => walk(boxed.as_ref(), rest, None, f),
    }
}

fn key_for_scalar(scalar: &Scalar) -> Option<Key> {
    match scalar {
        Scalar::Str(s) => Some(Key::Name(s.clone().into())),
        _ => scalar.as_index().map(Key::Index),
    }
}

/// One key/value pair of a container, viewed as a two-entry mapping with
/// `key` and `value` members. Synthesized by pair aggregation.
struct PairGraph<'a> {
    key: Scalar,
    value: GraphRef<'a>,
}

impl ObjectGraph for PairGraph<'_> {
    fn kind(&self) -> Kind {
        Kind::Mapping
    }

    fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
        match key {
            Key::Name(n) => match n.as_ref() {
                "key" => Some(GraphRef::owned(self.key.clone())),
                "value" => Some(GraphRef::Borrowed(self.value.graph())),
                _ => None,
            },
            _ => None,
        }
    }

    fn len(&self) -> Option<usize> {
        Some(2)
    }

    fn entries(&self) -> Option<Entries<'_>> {
        Some(Box::new(
            [
                (Key::Name("key".into()), GraphRef::owned(self.key.clone())),
                (
                    Key::Name("value".into()),
                    GraphRef::Borrowed(self.value.graph()),
                ),
            ]
            .into_iter(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::m;
    use serde_json::json;

    fn outcome(object: &dyn ObjectGraph, member: &crate::member::Member) -> &'static str {
        with_member(object, member.keys(), |found| match found {
            Found::Value(_) => "value",
            Found::Missing => "missing",
            Found::Infeasible => "infeasible",
        })
    }

    #[test]
    fn resolves_nested_paths() {
        let doc = json!({"user": {"emails": ["a@x", "b@x"]}});
        assert_eq!(outcome(&doc, &m("user").key("emails").idx(1)), "value");
        assert_eq!(outcome(&doc, &m("user").key("emails").idx(9)), "missing");
        assert_eq!(outcome(&doc, &m("user").key("phone")), "missing");
    }

    #[test]
    fn kind_mismatch_is_infeasible() {
        let doc = json!({"user": {"age": 30}});
        // a name into a scalar
        assert_eq!(outcome(&doc, &m("user").key("age").key("x")), "infeasible");
        // an index into a mapping
        assert_eq!(outcome(&doc, &m("user").idx(0)), "infeasible");
    }

    #[test]
    fn property_steps_produce_owned_nodes() {
        let doc = json!({"tags": ["a", "b"]});
        let size = with_member(&doc, m("tags").size().keys(), |found| match found {
            Found::Value(g) => g.as_scalar(),
            _ => None,
        });
        assert_eq!(size, Some(Scalar::Uint(2)));
        // size of a number is not a thing
        assert_eq!(outcome(&json!({"n": 4}), &m("n").size()), "infeasible");
    }

    #[test]
    fn pair_steps_expose_key_and_value() {
        let doc = json!({"limits": {"mem": 64}});
        let pair = |leaf: &'static str| {
            crate::member::Member::from_keys([
                Key::Name("limits".into()),
                Key::PairOf(Scalar::Str("mem".into())),
                Key::Name(leaf.into()),
            ])
        };
        let read = |member: &crate::member::Member| {
            with_member(&doc, member.keys(), |found| match found {
                Found::Value(g) => g.as_scalar(),
                _ => None,
            })
        };
        assert_eq!(read(&pair("value")), Some(Scalar::Int(64)));
        assert_eq!(read(&pair("key")), Some(Scalar::Str("mem".into())));
        assert_eq!(outcome(&doc, &pair("other")), "missing");
    }

    #[test]
    fn exists_treats_infeasible_as_absent() {
        let doc = json!({"a": 1});
        assert!(exists(&doc, m("a").keys()));
        assert!(!exists(&doc, m("b").keys()));
        assert!(!exists(&doc, m("a").key("deeper").keys()));
    }
}
