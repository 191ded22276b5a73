//! Leaf predicates.
//!
//! An operator is a stateless binary predicate over two resolved graph
//! nodes, tagged with the positive and negated descriptions reporters use
//! to phrase failures. Any type satisfying [`Operator`] plugs into the
//! dispatch engine; the built-ins cover comparison, containment and regex
//! matching.

mod compare;
mod contains;
mod regex;

pub use compare::{
    Equal, GreaterThan, GreaterThanOrEqual, LessThan, LessThanOrEqual, NotEqual, eq, gt, gte, lt,
    lte, ne,
};
pub use contains::{Contains, In, NotIn, check_contains, contains, in_, nin};
pub use self::regex::{Matches, matches, matches_str};

use std::fmt;

use crate::object::ObjectGraph;

/// Contract every leaf predicate satisfies.
///
/// Operators are value types with no mutable state; one instance serves
/// any number of validations.
pub trait Operator: fmt::Debug + Send + Sync {
    /// Evaluates the predicate over two resolved nodes.
    fn apply(&self, lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> bool;

    /// Description used when the predicate should have held.
    fn description(&self) -> &'static str;

    /// Description used when the predicate should *not* have held.
    fn negated_description(&self) -> &'static str;
}
