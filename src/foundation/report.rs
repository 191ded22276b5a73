//! Failure report returned by reporting entry points.

use serde::{Deserialize, Serialize};

use crate::foundation::Status;

/// A human-readable description of why validation failed.
///
/// The message is produced by whatever [`Reporter`](crate::adapter::Reporter)
/// observed the evaluation; the engine itself only guarantees it describes
/// the branches that were actually traversed, not the full static tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("validation failed: {message}")]
pub struct Report {
    /// Terminal status of the evaluation (always falsy).
    pub status: Status,
    /// Rendered failure description.
    pub message: String,
}

impl Report {
    /// Creates a report from a terminal status and a rendered message.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
