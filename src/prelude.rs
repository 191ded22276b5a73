//! One-stop import for building and running validators.
//!
//! ```rust,ignore
//! use scrutiny::prelude::*;
//!
//! let rule = all_of![
//!     m("age").is(gte(), 18),
//!     m("emails").size().is(gte(), 1u64),
//! ];
//! ```

pub use crate::adapter::{
    Adapter, AdapterConfig, DefaultAdapter, DefaultReporter, Reporter, ReportingAdapter,
    SingleMemberAdapter, UnknownMemberPolicy,
};
pub use crate::aggregation::AggregationKind;
pub use crate::combinators::{
    Operand, Validator, and, not, object_has, object_is, or, validate,
};
pub use crate::foundation::{Report, Status};
pub use crate::member::{AggregationTarget, Key, Member, MemberCall, m};
pub use crate::object::{Entries, GraphRef, Invoked, Kind, ObjectGraph, Scalar};
pub use crate::operators::{
    Operator, contains, eq, gt, gte, in_, lt, lte, matches, matches_str, ne, nin,
};
pub use crate::properties::Property;
pub use crate::{all_of, any_of, member};
