//! Regular expression matching.

use regex::Regex;

use crate::object::{ObjectGraph, Scalar};
use crate::operators::Operator;

/// The resolved value must be a string matching the pattern.
///
/// Non-string values never match. The pattern is compiled once when the
/// operator is built and shared across validations.
#[derive(Debug, Clone)]
pub struct Matches {
    re: Regex,
}

impl Matches {
    /// Wraps a compiled pattern.
    #[must_use]
    pub const fn new(re: Regex) -> Self {
        Self { re }
    }

    /// The pattern this operator matches against.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.re.as_str()
    }
}

impl Operator for Matches {
    fn apply(&self, lhs: &dyn ObjectGraph, _rhs: &dyn ObjectGraph) -> bool {
        match lhs.as_scalar() {
            Some(Scalar::Str(s)) => self.re.is_match(&s),
            _ => false,
        }
    }

    fn description(&self) -> &'static str {
        "must match pattern"
    }

    fn negated_description(&self) -> &'static str {
        "must not match pattern"
    }
}

/// Creates the `matches` operator from a compiled pattern.
#[must_use]
pub const fn matches(re: Regex) -> Matches {
    Matches::new(re)
}

/// Creates the `matches` operator, compiling the pattern first.
pub fn matches_str(pattern: &str) -> Result<Matches, regex::Error> {
    Regex::new(pattern).map(Matches::new)
}
