//! Object-graph abstraction: the capability probe every candidate object
//! type implements to participate in validation.
//!
//! The engine never knows the concrete shape of the objects it validates.
//! Instead it interrogates them through [`ObjectGraph`]: what *kind* of
//! container is this, can this kind of key ever resolve here (feasibility),
//! does this key resolve right now (existence), what are the elements, what
//! is the leaf value, and which named accessors with how many arguments
//! does it expose.
//!
//! Feasibility and existence are deliberately separate answers: a string
//! key on a sequence is *infeasible* (the path can never apply, the check
//! is vacuous), while an absent map key is merely *missing* (the
//! unknown-member policy of the adapter decides what that means).

mod json;
mod scalar;
mod std_impls;

pub use scalar::Scalar;

use crate::member::Key;

// ============================================================================
// KIND
// ============================================================================

/// Coarse shape of a value, used for key feasibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Leaf value with no members.
    Scalar,
    /// Index-addressable ordered container.
    Sequence,
    /// Name-addressable key/value container.
    Mapping,
    /// Membership container; elements are their own keys.
    Set,
    /// A structure the engine can only reach through named accessors.
    Opaque,
}

// ============================================================================
// GRAPH REFERENCES
// ============================================================================

/// A resolved node of an object graph: either borrowed from the object or
/// synthesized during resolution (property results, accessor returns).
pub enum GraphRef<'a> {
    /// Node borrowed from the underlying object.
    Borrowed(&'a dyn ObjectGraph),
    /// Node produced during resolution and owned by the walk.
    Owned(Box<dyn ObjectGraph + 'a>),
}

impl<'a> GraphRef<'a> {
    /// Wraps an owned value.
    pub fn owned(value: impl ObjectGraph + 'a) -> Self {
        GraphRef::Owned(Box::new(value))
    }

    /// Borrows the node regardless of ownership.
    #[must_use]
    pub fn graph(&self) -> &dyn ObjectGraph {
        match self {
            GraphRef::Borrowed(g) => *g,
            GraphRef::Owned(b) => b.as_ref(),
        }
    }
}

/// Iterator over the immediate elements of a container node.
///
/// Mappings yield `(Key::Name, value)`, sequences `(Key::Index, element)`,
/// sets `(Key::Name, element)` with the element as its own key.
pub type Entries<'a> = Box<dyn Iterator<Item = (Key, GraphRef<'a>)> + 'a>;

/// Result of invoking a named accessor with bound arguments.
pub enum Invoked<'a> {
    /// The accessor produced a value.
    Value(GraphRef<'a>),
    /// The accessor exists but has nothing for these arguments.
    Missing,
    /// An argument does not convert to the accessor's parameter type;
    /// the path is infeasible, not a runtime failure.
    BadArgs,
    /// No such accessor on this type.
    Unsupported,
}

// ============================================================================
// OBJECT GRAPH
// ============================================================================

/// Uniform read-only view over a validatable value.
///
/// Implementations are expected to be side-effect free; the engine may
/// probe the same node several times during one validation.
///
/// Only [`kind`](ObjectGraph::kind) is required. Scalars stop there;
/// containers additionally implement [`get`](ObjectGraph::get),
/// [`len`](ObjectGraph::len) and [`entries`](ObjectGraph::entries);
/// structs exposing parameterized accessors implement
/// [`accessor_arity`](ObjectGraph::accessor_arity) and
/// [`invoke`](ObjectGraph::invoke).
pub trait ObjectGraph {
    /// Coarse shape of this node.
    fn kind(&self) -> Kind;

    /// Feasibility probe: can a key of this shape *ever* resolve on this
    /// type. The default derives the answer from [`kind`](ObjectGraph::kind).
    fn supports_key(&self, key: &Key) -> bool {
        matches!(
            (self.kind(), key),
            (Kind::Mapping | Kind::Set, Key::Name(_)) | (Kind::Sequence, Key::Index(_))
        )
    }

    /// Runtime lookup of an immediate member.
    fn get(&self, key: &Key) -> Option<GraphRef<'_>> {
        let _ = key;
        None
    }

    /// Element count, for container nodes.
    fn len(&self) -> Option<usize> {
        None
    }

    /// Immediate elements, for container nodes.
    fn entries(&self) -> Option<Entries<'_>> {
        None
    }

    /// Leaf value of this node, if it has one.
    fn as_scalar(&self) -> Option<Scalar> {
        None
    }

    /// Declared argument count of a named accessor, if the type exposes it.
    fn accessor_arity(&self, name: &str) -> Option<usize> {
        let _ = name;
        None
    }

    /// Invokes a named accessor once all its arguments are bound.
    fn invoke(&self, name: &str, args: &[Scalar]) -> Invoked<'_> {
        let _ = (name, args);
        Invoked::Unsupported
    }

    /// Short rendering used by reporters.
    fn describe(&self) -> String {
        match self.as_scalar() {
            Some(s) => s.to_string(),
            None => match self.kind() {
                Kind::Sequence => "<sequence>".to_owned(),
                Kind::Mapping => "<mapping>".to_owned(),
                Kind::Set => "<set>".to_owned(),
                Kind::Scalar | Kind::Opaque => "<value>".to_owned(),
            },
        }
    }
}
