//! `ObjectGraph` implementations for standard-library types.
//!
//! Scalars are leaf nodes; `Vec`/slices are sequences; string-keyed maps
//! are mappings; string sets are membership containers whose elements are
//! their own keys (so `exists` and `contains` work directly on them).

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

use crate::member::Key;
use crate::object::{Entries, GraphRef, Kind, ObjectGraph, Scalar};

// ============================================================================
// SCALAR LEAVES
// ============================================================================

macro_rules! leaf_graph {
    ($($ty:ty => |$v:ident| $expr:expr),+ $(,)?) => {
        $(impl ObjectGraph for $ty {
            fn kind(&self) -> Kind {
                Kind::Scalar
            }

            fn as_scalar(&self) -> Option<Scalar> {
                let $v = self;
                Some($expr)
            }
        })+
    };
}

leaf_graph! {
    bool => |v| Scalar::Bool(*v),
    i8 => |v| Scalar::Int(i64::from(*v)),
    i16 => |v| Scalar::Int(i64::from(*v)),
    i32 => |v| Scalar::Int(i64::from(*v)),
    i64 => |v| Scalar::Int(*v),
    u8 => |v| Scalar::Uint(u64::from(*v)),
    u16 => |v| Scalar::Uint(u64::from(*v)),
    u32 => |v| Scalar::Uint(u64::from(*v)),
    u64 => |v| Scalar::Uint(*v),
    usize => |v| Scalar::Uint(*v as u64),
    f32 => |v| Scalar::Float(f64::from(*v)),
    f64 => |v| Scalar::Float(*v),
}

impl ObjectGraph for str {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn as_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Str(self.to_owned()))
    }
}

impl ObjectGraph for String {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn len(&self) -> Option<usize> {
        Some(self.as_str().len())
    }

    fn as_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Str(self.clone()))
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

impl<T: ObjectGraph> ObjectGraph for [T] {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
        match key {
            Key::Index(i) => self.get(*i).map(|v| GraphRef::Borrowed(v)),
            _ => None,
        }
    }

    fn len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn entries(&self) -> Option<Entries<'_>> {
        Some(Box::new(
            self.iter()
                .enumerate()
                .map(|(i, v)| (Key::Index(i), GraphRef::Borrowed(v))),
        ))
    }
}

impl<T: ObjectGraph> ObjectGraph for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
        ObjectGraph::get(self.as_slice(), key)
    }

    fn len(&self) -> Option<usize> {
        ObjectGraph::len(self.as_slice())
    }

    fn entries(&self) -> Option<Entries<'_>> {
        self.as_slice().entries()
    }
}

// ============================================================================
// MAPPINGS
// ============================================================================

macro_rules! map_graph_body {
    () => {
        fn kind(&self) -> Kind {
            Kind::Mapping
        }

        fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
            match key {
                Key::Name(name) => self.get(name.as_ref()).map(|v| GraphRef::Borrowed(v)),
                _ => None,
            }
        }

        fn len(&self) -> Option<usize> {
            Some(self.len())
        }

        fn entries(&self) -> Option<Entries<'_>> {
            Some(Box::new(self.iter().map(|(k, v)| {
                (Key::Name(Cow::Owned(k.clone())), GraphRef::Borrowed(v))
            })))
        }
    };
}

impl<T: ObjectGraph, S: BuildHasher> ObjectGraph for HashMap<String, T, S> {
    map_graph_body!();
}

impl<T: ObjectGraph> ObjectGraph for BTreeMap<String, T> {
    map_graph_body!();
}

// ============================================================================
// SETS
// ============================================================================

macro_rules! set_graph_body {
    () => {
        fn kind(&self) -> Kind {
            Kind::Set
        }

        fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
            match key {
                Key::Name(name) => self.get(name.as_ref()).map(|v| GraphRef::Borrowed(v)),
                _ => None,
            }
        }

        fn len(&self) -> Option<usize> {
            Some(self.len())
        }

        fn entries(&self) -> Option<Entries<'_>> {
            Some(Box::new(self.iter().map(|e| {
                (Key::Name(Cow::Owned(e.clone())), GraphRef::Borrowed(e))
            })))
        }
    };
}

impl<S: BuildHasher> ObjectGraph for HashSet<String, S> {
    set_graph_body!();
}

impl ObjectGraph for BTreeSet<String> {
    set_graph_body!();
}

// ============================================================================
// TESTS
// ============================================================================
