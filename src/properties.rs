//! Property tags: named facets extracted from a resolved value.
//!
//! A property is applied *after* path resolution: `value` is the identity,
//! `size` and `empty` read the container element count. A property the
//! reached value does not support makes the check vacuous, mirroring how
//! an infeasible path is treated.

use serde::{Deserialize, Serialize};

use crate::object::{GraphRef, ObjectGraph, Scalar};

/// Built-in facet selectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// The value itself.
    #[default]
    Value,
    /// Element count of a container.
    Size,
    /// Whether a container has no elements.
    Empty,
}

impl Property {
    /// Reporting name of the facet.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Property::Value => "value",
            Property::Size => "size",
            Property::Empty => "emptiness",
        }
    }

    /// Extracts the facet from a resolved node. `None` means the node's
    /// type has no such facet.
    #[must_use]
    pub fn read<'a>(self, graph: &'a dyn ObjectGraph) -> Option<GraphRef<'a>> {
        match self {
            Property::Value => Some(GraphRef::Borrowed(graph)),
            Property::Size => graph.len().map(|n| GraphRef::owned(Scalar::Uint(n as u64))),
            Property::Empty => graph.len().map(|n| GraphRef::owned(Scalar::Bool(n == 0))),
        }
    }
}
