//! # scrutiny
//!
//! A partial-validation engine for arbitrary object graphs.
//!
//! Rules are built once as immutable trees and run against any number of
//! objects through pluggable adapters. A rule names *members* (paths into
//! the object), *properties* of the values they resolve to, *operators*
//! over those properties, and *operands* to compare with — fixed values,
//! other members of the same object, or a reference sample.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scrutiny::prelude::*;
//!
//! let rule = all_of![
//!     m("age").is(gte(), 18),
//!     m("emails").size().is(gte(), 1u64),
//!     m("emails").all().is(matches_str(".+@.+")?),
//! ];
//!
//! match rule.apply_reporting(&document) {
//!     Ok(()) => println!("valid"),
//!     Err(report) => println!("{report}"),
//! }
//! ```
//!
//! ## Three-valued results
//!
//! Every check yields a [`Status`](foundation::Status): `Ok`, `Fail`, or
//! `Ignore`. Checks over paths that can never apply to the object's type
//! are vacuously `Ok`; paths that are feasible but absent follow the
//! adapter's unknown-member policy and usually yield `Ignore`, which no
//! `AND` fold treats as a failure. This is what makes validating partial
//! updates against a full rule set practical.
//!
//! ## Adapters
//!
//! [`DefaultAdapter`](adapter::DefaultAdapter) evaluates directly;
//! [`ReportingAdapter`](adapter::ReportingAdapter) renders failure
//! descriptions; [`SingleMemberAdapter`](adapter::SingleMemberAdapter)
//! re-checks a single field against the whole rule set.

pub mod adapter;
pub mod aggregation;
pub mod combinators;
pub mod foundation;
mod macros;
pub mod member;
pub mod object;
pub mod operators;
pub mod prelude;
pub mod properties;
