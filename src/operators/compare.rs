//! Comparison operators over coercing scalar ordering.
//!
//! All six operators go through [`Scalar::compare`](crate::object::Scalar),
//! so signed/unsigned pairs are sign-correct and boolean operands coerce
//! the other side. Incomparable pairs fail every ordering predicate and
//! `eq`; only `ne` holds for them.

use std::cmp::Ordering;

use crate::object::ObjectGraph;
use crate::operators::Operator;

fn ordered(lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> Option<Ordering> {
    lhs.as_scalar()?.compare(&rhs.as_scalar()?)
}

macro_rules! comparison_operator {
    (
        $(#[$meta:meta])*
        $name:ident, $factory:ident,
        |$ord:ident| $test:expr,
        $desc:literal, $n_desc:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Operator for $name {
            fn apply(&self, lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> bool {
                match ordered(lhs, rhs) {
                    Some($ord) => $test,
                    None => false,
                }
            }

            fn description(&self) -> &'static str {
                $desc
            }

            fn negated_description(&self) -> &'static str {
                $n_desc
            }
        }

        #[doc = concat!("Creates the `", stringify!($factory), "` operator.")]
        #[must_use]
        pub const fn $factory() -> $name {
            $name
        }
    };
}

comparison_operator! {
    /// Coercing equality.
    Equal, eq,
    |ord| ord == Ordering::Equal,
    "must be equal to", "must not be equal to"
}

comparison_operator! {
    /// Strict less-than.
    LessThan, lt,
    |ord| ord == Ordering::Less,
    "must be less than", "must be greater than or equal to"
}

comparison_operator! {
    /// Less-than-or-equal.
    LessThanOrEqual, lte,
    |ord| ord != Ordering::Greater,
    "must be less than or equal to", "must be greater than"
}

comparison_operator! {
    /// Strict greater-than.
    GreaterThan, gt,
    |ord| ord == Ordering::Greater,
    "must be greater than", "must be less than or equal to"
}

comparison_operator! {
    /// Greater-than-or-equal.
    GreaterThanOrEqual, gte,
    |ord| ord != Ordering::Less,
    "must be greater than or equal to", "must be less than"
}

/// Coercing inequality. Incomparable pairs are unequal by definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotEqual;

impl Operator for NotEqual {
    fn apply(&self, lhs: &dyn ObjectGraph, rhs: &dyn ObjectGraph) -> bool {
        ordered(lhs, rhs) != Some(Ordering::Equal)
    }

    fn description(&self) -> &'static str {
        "must not be equal to"
    }

    fn negated_description(&self) -> &'static str {
        "must be equal to"
    }
}

/// Creates the `ne` operator.
#[must_use]
pub const fn ne() -> NotEqual {
    NotEqual
}
