//! Validator construction and evaluation.
//!
//! A [`Validator`] is an immutable tree of leaf checks joined by logical
//! aggregation and scoped nesting. Construction never touches an object;
//! the tree is pure data behind an `Arc`, so cloning shares it and one
//! validator can run against any number of objects, sequentially or from
//! several threads at once.
//!
//! # Examples
//!
//! ```rust,ignore
//! let rule = all_of![
//!     m("age").is(gte(), 18),
//!     m("emails").size().is(gte(), 1u64),
//!     m("nickname").exists(true),
//! ];
//! assert_eq!(rule.apply(&document), Status::Ok);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::adapter::{
    Adapter, AdapterConfig, DefaultAdapter, DefaultReporter, ReportingAdapter,
};
use crate::aggregation::dispatch;
use crate::foundation::{Report, Status};
use crate::member::{Member, MemberCall};
use crate::object::{ObjectGraph, Scalar};
use crate::operators::Operator;
use crate::properties::Property;

// ============================================================================
// OPERANDS
// ============================================================================

/// The right-hand side of a leaf check.
#[derive(Clone)]
pub enum Operand {
    /// A fixed scalar.
    Value(Scalar),
    /// A fixed structured value (container literals, custom graphs).
    Object(Arc<dyn ObjectGraph + Send + Sync>),
    /// Another member of the object under validation.
    OtherMember(Member),
    /// The same member of a reference object.
    Sample(Arc<dyn ObjectGraph + Send + Sync>),
    /// A scalar recomputed at each evaluation.
    Lazy(Arc<dyn Fn() -> Scalar + Send + Sync>),
}

impl Operand {
    /// Fixed scalar operand.
    pub fn value(value: impl Into<Scalar>) -> Self {
        Operand::Value(value.into())
    }

    /// Fixed structured operand.
    pub fn object(value: impl ObjectGraph + Send + Sync + 'static) -> Self {
        Operand::Object(Arc::new(value))
    }

    /// Compare against another member of the same object.
    pub fn member(member: impl Into<Member>) -> Self {
        Operand::OtherMember(member.into())
    }

    /// Compare against the same member of a reference object.
    pub fn sample(value: impl ObjectGraph + Send + Sync + 'static) -> Self {
        Operand::Sample(Arc::new(value))
    }

    /// Operand recomputed at each evaluation.
    pub fn lazy(f: impl Fn() -> Scalar + Send + Sync + 'static) -> Self {
        Operand::Lazy(Arc::new(f))
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(s) => f.debug_tuple("Value").field(s).finish(),
            Operand::Object(_) => f.write_str("Object(..)"),
            Operand::OtherMember(m) => f.debug_tuple("OtherMember").field(m).finish(),
            Operand::Sample(_) => f.write_str("Sample(..)"),
            Operand::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<Scalar> for Operand {
    fn from(value: Scalar) -> Self {
        Operand::Value(value)
    }
}

impl From<Member> for Operand {
    fn from(member: Member) -> Self {
        Operand::OtherMember(member)
    }
}

impl From<MemberCall> for Operand {
    fn from(call: MemberCall) -> Self {
        Operand::OtherMember(call.into())
    }
}

macro_rules! scalar_operand {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Value(value.into())
                }
            }
        )+
    };
}

scalar_operand!(bool, i32, i64, u32, u64, usize, f64, &str, String);

// ============================================================================
// VALIDATOR
// ============================================================================

#[derive(Debug)]
enum Node {
    /// Check on the value the current scope denotes.
    Whole {
        prop: Property,
        op: Arc<dyn Operator>,
        operand: Operand,
    },
    /// Check on one member under the current scope.
    Leaf {
        member: Member,
        prop: Property,
        op: Arc<dyn Operator>,
        operand: Operand,
    },
    /// Runtime existence check.
    Exists { member: Member, expected: bool },
    And(Vec<Validator>),
    Or(Vec<Validator>),
    Not(Validator),
    /// Re-scopes the inner tree onto a member.
    Scoped { member: Member, inner: Validator },
}

/// An immutable, shareable validation rule tree.
#[derive(Debug, Clone)]
pub struct Validator {
    node: Arc<Node>,
}

impl Validator {
    fn new(node: Node) -> Self {
        Validator {
            node: Arc::new(node),
        }
    }

    /// Evaluates the tree through an adapter, under a member scope.
    ///
    /// Entry points pass [`Member::root`]; scoped nesting passes the
    /// resolved member paths it generates.
    pub fn eval<A: Adapter + ?Sized>(&self, adapter: &A, scope: &Member) -> Status {
        match self.node.as_ref() {
            Node::Whole { prop, op, operand } => {
                if scope.is_root() {
                    eval_whole(adapter, *prop, op.as_ref(), operand)
                } else {
                    eval_leaf(adapter, scope, &Member::root(), *prop, op.as_ref(), operand)
                }
            }
            Node::Leaf {
                member,
                prop,
                op,
                operand,
            } => eval_leaf(adapter, scope, member, *prop, op.as_ref(), operand),
            Node::Exists { member, expected } => {
                let full = scope.join(member);
                dispatch(adapter, &full, |a, concrete| {
                    a.validate_exists(concrete, *expected)
                })
            }
            Node::And(children) => adapter.validate_and(scope, children),
            Node::Or(children) => adapter.validate_or(scope, children),
            Node::Not(inner) => adapter.validate_not(scope, inner),
            Node::Scoped { member, inner } => adapter.validate_nested(scope, member, inner),
        }
    }

    /// Runs against one object with the default adapter.
    #[must_use]
    pub fn apply(&self, object: &dyn ObjectGraph) -> Status {
        self.eval(&DefaultAdapter::new(object), &Member::root())
    }

    /// Runs against one object with explicit configuration.
    #[must_use]
    pub fn apply_with_config(&self, object: &dyn ObjectGraph, config: AdapterConfig) -> Status {
        self.eval(&DefaultAdapter::with_config(object, config), &Member::root())
    }

    /// Runs through a caller-built adapter.
    #[must_use]
    pub fn apply_adapter<A: Adapter + ?Sized>(&self, adapter: &A) -> Status {
        self.eval(adapter, &Member::root())
    }

    /// Runs with reporting; a failure carries the rendered description.
    pub fn apply_reporting(&self, object: &dyn ObjectGraph) -> Result<(), Report> {
        let adapter = ReportingAdapter::new(DefaultAdapter::new(object), DefaultReporter::new());
        let status = self.eval(&adapter, &Member::root());
        if status.is_fail() {
            Err(adapter.into_reporter().into_report(status))
        } else {
            Ok(())
        }
    }
}

fn eval_whole<A: Adapter + ?Sized>(
    adapter: &A,
    prop: Property,
    op: &dyn Operator,
    operand: &Operand,
) -> Status {
    match operand {
        Operand::OtherMember(other) => {
            adapter.validate_with_other_member(&Member::root(), prop, op, other)
        }
        Operand::Sample(sample) => {
            adapter.validate_with_master_sample(&Member::root(), prop, op, sample.as_ref())
        }
        Operand::Value(s) => eval_whole_rhs(adapter, prop, op, s),
        Operand::Object(o) => eval_whole_rhs(adapter, prop, op, o.as_ref()),
        Operand::Lazy(f) => {
            let value = f();
            eval_whole_rhs(adapter, prop, op, &value)
        }
    }
}

fn eval_whole_rhs<A: Adapter + ?Sized>(
    adapter: &A,
    prop: Property,
    op: &dyn Operator,
    rhs: &dyn ObjectGraph,
) -> Status {
    match prop {
        Property::Value => adapter.validate_operator(op, rhs),
        _ => adapter.validate_property(prop, op, rhs),
    }
}

fn eval_leaf<A: Adapter + ?Sized>(
    adapter: &A,
    scope: &Member,
    member: &Member,
    prop: Property,
    op: &dyn Operator,
    operand: &Operand,
) -> Status {
    let full = scope.join(member);
    dispatch(adapter, &full, |a, concrete| match operand {
        Operand::Value(s) => a.validate_member(concrete, prop, op, s),
        Operand::Object(o) => a.validate_member(concrete, prop, op, o.as_ref()),
        Operand::Lazy(f) => {
            let value = f();
            a.validate_member(concrete, prop, op, &value)
        }
        Operand::OtherMember(other) => {
            a.validate_with_other_member(concrete, prop, op, &scope.join(other))
        }
        Operand::Sample(sample) => {
            a.validate_with_master_sample(concrete, prop, op, sample.as_ref())
        }
    })
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl Member {
    /// Leaf check on this member's value.
    #[must_use]
    pub fn is(self, op: impl Operator + 'static, rhs: impl Into<Operand>) -> Validator {
        self.has(Property::Value, op, rhs)
    }

    /// Leaf check on a property of this member.
    #[must_use]
    pub fn has(
        self,
        prop: Property,
        op: impl Operator + 'static,
        rhs: impl Into<Operand>,
    ) -> Validator {
        Validator::new(Node::Leaf {
            member: self,
            prop,
            op: Arc::new(op),
            operand: rhs.into(),
        })
    }

    /// Runtime existence check on this member.
    #[must_use]
    pub fn exists(self, expected: bool) -> Validator {
        Validator::new(Node::Exists {
            member: self,
            expected,
        })
    }

    /// Scopes a whole validator tree onto this member.
    #[must_use]
    pub fn nest(self, inner: Validator) -> Validator {
        Validator::new(Node::Scoped {
            member: self,
            inner,
        })
    }
}

impl MemberCall {
    /// Leaf check on the call's result.
    #[must_use]
    pub fn is(self, op: impl Operator + 'static, rhs: impl Into<Operand>) -> Validator {
        self.done().is(op, rhs)
    }

    /// Leaf check on a property of the call's result.
    #[must_use]
    pub fn has(
        self,
        prop: Property,
        op: impl Operator + 'static,
        rhs: impl Into<Operand>,
    ) -> Validator {
        self.done().has(prop, op, rhs)
    }

    /// Runtime existence check on the call's result.
    #[must_use]
    pub fn exists(self, expected: bool) -> Validator {
        self.done().exists(expected)
    }
}

/// Conjunction of validators; `Ignore` children do not fail it.
#[must_use]
pub fn and(children: Vec<Validator>) -> Validator {
    Validator::new(Node::And(children))
}

/// Disjunction of validators; one non-failing child satisfies it.
#[must_use]
pub fn or(children: Vec<Validator>) -> Validator {
    Validator::new(Node::Or(children))
}

/// Negation; `Ignore` stays `Ignore`.
#[must_use]
pub fn not(inner: Validator) -> Validator {
    Validator::new(Node::Not(inner))
}

/// Check on the object itself.
#[must_use]
pub fn object_is(op: impl Operator + 'static, rhs: impl Into<Operand>) -> Validator {
    object_has(Property::Value, op, rhs)
}

/// Check on a property of the object itself.
#[must_use]
pub fn object_has(
    prop: Property,
    op: impl Operator + 'static,
    rhs: impl Into<Operand>,
) -> Validator {
    Validator::new(Node::Whole {
        prop,
        op: Arc::new(op),
        operand: rhs.into(),
    })
}

/// Runs a validator against an object with the default adapter.
#[must_use]
pub fn validate(object: &dyn ObjectGraph, validator: &Validator) -> Status {
    validator.apply(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::m;
    use crate::operators::{eq, gte, lt, ne};
    use serde_json::json;

    #[test]
    fn leaf_checks() {
        let doc = json!({"age": 30, "name": "ada"});
        assert_eq!(m("age").is(gte(), 18).apply(&doc), Status::Ok);
        assert_eq!(m("age").is(lt(), 18).apply(&doc), Status::Fail);
        assert_eq!(m("name").is(eq(), "ada").apply(&doc), Status::Ok);
    }

    #[test]
    fn logical_aggregation() {
        let doc = json!({"a": 1, "b": 2});
        let both = and(vec![m("a").is(eq(), 1), m("b").is(eq(), 2)]);
        assert_eq!(both.apply(&doc), Status::Ok);
        let either = or(vec![m("a").is(eq(), 9), m("b").is(eq(), 2)]);
        assert_eq!(either.apply(&doc), Status::Ok);
        assert_eq!(not(both).apply(&doc), Status::Fail);
    }

    #[test]
    fn negation_of_ignored_check_stays_ignored() {
        let doc = json!({"a": 1});
        let rule = not(m("missing").is(eq(), 1));
        assert_eq!(rule.apply(&doc), Status::Ignore);
    }

    #[test]
    fn scoped_nesting_resolves_relative_paths() {
        let doc = json!({"user": {"age": 30}});
        let rule = m("user").nest(m("age").is(gte(), 18));
        assert_eq!(rule.apply(&doc), Status::Ok);
        // the scope member itself is absent
        let rule = m("account").nest(m("age").is(gte(), 18));
        assert_eq!(rule.apply(&doc), Status::Ignore);
    }

    #[test]
    fn whole_object_checks() {
        let doc = json!(5);
        assert_eq!(object_is(gte(), 3).apply(&doc), Status::Ok);
        let tags = json!(["a", "b"]);
        assert_eq!(
            object_has(Property::Size, eq(), 2u64).apply(&tags),
            Status::Ok
        );
    }

    #[test]
    fn other_member_operand() {
        let doc = json!({"low": 1, "high": 5});
        let rule = m("high").is(gte(), m("low"));
        assert_eq!(rule.apply(&doc), Status::Ok);
        let rule = m("low").is(gte(), m("high"));
        assert_eq!(rule.apply(&doc), Status::Fail);
    }

    #[test]
    fn lazy_operand_recomputes() {
        let doc = json!({"n": 7});
        let rule = m("n").is(ne(), Operand::lazy(|| Scalar::Int(8)));
        assert_eq!(rule.apply(&doc), Status::Ok);
    }

    #[test]
    fn validators_are_reusable_and_cloneable() {
        let rule = m("age").is(gte(), 18);
        let same = rule.clone();
        assert_eq!(rule.apply(&json!({"age": 20})), Status::Ok);
        assert_eq!(same.apply(&json!({"age": 10})), Status::Fail);
        assert_eq!(rule.apply(&json!({"age": 20})), Status::Ok);
    }
}
