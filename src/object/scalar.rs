//! Scalar values — the comparison domain of leaf operators.
//!
//! Every value an operator can compare is normalized to a [`Scalar`].
//! Comparison is *coercing*: signed and unsigned integers compare
//! sign-correctly, integers and floats compare after widening to `f64`,
//! and a boolean compared against anything coerces the other side to its
//! truthiness. Values with no sensible common domain (a string and a
//! number, say) are incomparable and every ordering predicate over them
//! is false.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::object::{Kind, ObjectGraph};

// ============================================================================
// SCALAR
// ============================================================================

/// A leaf value extracted from an object graph or supplied as an operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// Absent / null value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    Str(String),
}

impl Scalar {
    /// Truthiness used when a boolean is compared against a non-boolean.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Bool(b) => *b,
            Scalar::Int(i) => *i != 0,
            Scalar::Uint(u) => *u != 0,
            Scalar::Float(f) => *f != 0.0,
            Scalar::Str(s) => !s.is_empty(),
        }
    }

    /// Coercing comparison. `None` means the two values share no common
    /// comparison domain.
    ///
    /// Signed/unsigned pairs never go through a lossy cast: a negative
    /// signed value is less than any unsigned value, otherwise the signed
    /// side is widened into the unsigned domain.
    #[must_use]
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        use Scalar::{Bool, Float, Int, Null, Str, Uint};
        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Bool(_), _) | (_, Bool(_)) => Some(self.truthy().cmp(&other.truthy())),
            (Null, _) | (_, Null) => None,
            (Int(a), Int(b)) => Some(a.cmp(b)),
            (Uint(a), Uint(b)) => Some(a.cmp(b)),
            (Int(a), Uint(b)) => Some(if *a < 0 {
                Ordering::Less
            } else {
                #[allow(clippy::cast_sign_loss)]
                (*a as u64).cmp(b)
            }),
            (Uint(a), Int(b)) => Some(if *b < 0 {
                Ordering::Greater
            } else {
                #[allow(clippy::cast_sign_loss)]
                a.cmp(&(*b as u64))
            }),
            (Int(_) | Uint(_) | Float(_), Int(_) | Uint(_) | Float(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            (Str(a), Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Coercing equality: equal iff comparable and ordered equal.
    #[must_use]
    pub fn equals(&self, other: &Scalar) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Interprets the scalar as a container index, when non-negative.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Scalar::Uint(u) => usize::try_from(*u).ok(),
            Scalar::Int(i) => usize::try_from(*i).ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Scalar::Int(i) => Some(*i as f64),
            #[allow(clippy::cast_precision_loss)]
            Scalar::Uint(u) => Some(*u as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Uint(u) => write!(f, "{u}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => write!(f, "{s}"),
        }
    }
}

// A scalar is itself a (leaf) object graph, which lets operands and
// property results flow through the same dispatch paths as real objects.
impl ObjectGraph for Scalar {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn as_scalar(&self) -> Option<Scalar> {
        Some(self.clone())
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! scalar_from {
    ($($ty:ty => |$v:ident| $expr:expr),+ $(,)?) => {
        $(impl From<$ty> for Scalar {
            fn from($v: $ty) -> Self { $expr }
        })+
    };
}

scalar_from! {
    bool => |v| Scalar::Bool(v),
    i8 => |v| Scalar::Int(i64::from(v)),
    i16 => |v| Scalar::Int(i64::from(v)),
    i32 => |v| Scalar::Int(i64::from(v)),
    i64 => |v| Scalar::Int(v),
    u8 => |v| Scalar::Uint(u64::from(v)),
    u16 => |v| Scalar::Uint(u64::from(v)),
    u32 => |v| Scalar::Uint(u64::from(v)),
    u64 => |v| Scalar::Uint(v),
    usize => |v| Scalar::Uint(v as u64),
    f32 => |v| Scalar::Float(f64::from(v)),
    f64 => |v| Scalar::Float(v),
    &str => |v| Scalar::Str(v.to_owned()),
    String => |v| Scalar::Str(v),
}

// ============================================================================
// TESTS
// ============================================================================
