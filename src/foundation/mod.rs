//! Core value types of the validation engine.
//!
//! - [`Status`] — tri-state outcome every component composes.
//! - [`Report`] — rendered failure description for reporting entry points.

mod report;
mod status;

pub use report::Report;
pub use status::Status;
