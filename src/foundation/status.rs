//! Tri-state validation status.
//!
//! Every validation operation in the engine returns a [`Status`] rather than
//! a plain boolean: besides passing and failing, a check can be *ignored*
//! (the member it refers to cannot apply to the object at hand). Ignored
//! checks count as success when statuses are folded, so a validator written
//! against a richer object shape degrades gracefully on a poorer one.

use serde::{Deserialize, Serialize};

// ============================================================================
// STATUS
// ============================================================================

/// Outcome of a single validation operation.
///
/// `Ignore` and `Ok` are both truthy for short-circuit purposes; only
/// `Fail` converts to `false`.
///
/// # Examples
///
/// ```
/// use scrutiny::foundation::Status;
///
/// assert!(Status::Ok.as_bool());
/// assert!(Status::Ignore.as_bool());
/// assert!(!Status::Fail.as_bool());
/// assert_eq!(Status::from(false), Status::Fail);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The check passed.
    #[default]
    Ok,
    /// The check failed.
    Fail,
    /// The check could not apply to this object and was skipped.
    Ignore,
}

impl Status {
    /// Boolean view: everything except `Fail` is truthy.
    #[must_use]
    pub fn as_bool(self) -> bool {
        self != Status::Fail
    }

    /// Returns `true` for `Fail`.
    #[must_use]
    pub fn is_fail(self) -> bool {
        self == Status::Fail
    }

    /// Returns `true` for `Ignore`.
    #[must_use]
    pub fn is_ignore(self) -> bool {
        self == Status::Ignore
    }

    /// Logical negation. `Ignore` is a fixed point: a skipped check stays
    /// skipped under NOT.
    #[must_use]
    pub fn negate(self) -> Status {
        match self {
            Status::Ok => Status::Fail,
            Status::Fail => Status::Ok,
            Status::Ignore => Status::Ignore,
        }
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok { Status::Ok } else { Status::Fail }
    }
}

impl From<Status> for bool {
    fn from(status: Status) -> Self {
        status.as_bool()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_round_trip() {
        assert_eq!(Status::from(true), Status::Ok);
        assert_eq!(Status::from(false), Status::Fail);
        assert!(bool::from(Status::Ok));
        assert!(!bool::from(Status::Fail));
    }

    #[test]
    fn ignore_is_truthy() {
        assert!(Status::Ignore.as_bool());
        assert!(Status::Ignore.is_ignore());
    }

    #[test]
    fn negation() {
        assert_eq!(Status::Ok.negate(), Status::Fail);
        assert_eq!(Status::Fail.negate(), Status::Ok);
        assert_eq!(Status::Ignore.negate(), Status::Ignore);
    }

    #[test]
    fn default_is_ok() {
        assert_eq!(Status::default(), Status::Ok);
    }
}
