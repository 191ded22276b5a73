//! Validation adapters.
//!
//! An adapter binds a validator tree to one object and decides what each
//! kind of leaf check means against it. [`DefaultAdapter`] evaluates
//! checks directly; decorators wrap any adapter to add behavior:
//! [`ReportingAdapter`] records failure descriptions and
//! [`SingleMemberAdapter`] restricts evaluation to one member path.

mod reporting;
mod single_member;

pub use reporting::{DefaultReporter, Reporter, ReportingAdapter};
pub use single_member::SingleMemberAdapter;

use std::fmt;

use crate::aggregation::{AggregationKind, dispatch, fold_and, fold_or};
use crate::combinators::Validator;
use crate::foundation::Status;
use crate::member::{Found, Member, exists, with_member};
use crate::object::ObjectGraph;
use crate::operators::Operator;
use crate::properties::Property;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// What a type-feasible but absent member means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownMemberPolicy {
    /// Skip the check; the member's absence is not this rule's concern.
    #[default]
    Ignore,
    /// Fail the check; absent members abort validation.
    Abort,
}

/// Per-adapter evaluation knobs.
#[derive(Debug, Clone, Copy)]
pub struct AdapterConfig {
    /// Policy for members that are feasible but absent.
    pub unknown_member: UnknownMemberPolicy,
    /// Pre-check member existence before evaluating any leaf against it.
    pub check_member_exists: bool,
    /// Result of `ALL` over an empty container.
    pub on_empty_all: Status,
    /// Result of `ANY` over an empty container.
    pub on_empty_any: Status,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            unknown_member: UnknownMemberPolicy::Ignore,
            check_member_exists: false,
            on_empty_all: Status::Ok,
            on_empty_any: Status::Fail,
        }
    }
}

impl AdapterConfig {
    /// Sets the unknown-member policy.
    #[must_use]
    pub fn unknown_member(mut self, policy: UnknownMemberPolicy) -> Self {
        self.unknown_member = policy;
        self
    }

    /// Enables the existence pre-check before every member leaf.
    #[must_use]
    pub fn check_member_exists(mut self, check: bool) -> Self {
        self.check_member_exists = check;
        self
    }

    /// Overrides the empty-container result for `ALL`.
    #[must_use]
    pub fn on_empty_all(mut self, status: Status) -> Self {
        self.on_empty_all = status;
        self
    }

    /// Overrides the empty-container result for `ANY`.
    #[must_use]
    pub fn on_empty_any(mut self, status: Status) -> Self {
        self.on_empty_any = status;
        self
    }

    /// The status an absent member yields under the configured policy.
    #[must_use]
    pub fn not_found_status(&self) -> Status {
        match self.unknown_member {
            UnknownMemberPolicy::Ignore => Status::Ignore,
            UnknownMemberPolicy::Abort => Status::Fail,
        }
    }
}

// ============================================================================
// ADAPTER TRAIT
// ============================================================================

/// Evaluation strategy for one object.
///
/// The required methods cover the leaf checks; the provided methods give
/// every adapter the same logical-aggregation and nesting semantics, with
/// [`Adapter::on_aggregation_begin`]/[`Adapter::on_aggregation_end`] as
/// the hooks decorators observe.
pub trait Adapter {
    /// The object under validation.
    fn object(&self) -> &dyn ObjectGraph;

    /// Evaluation knobs.
    fn config(&self) -> &AdapterConfig;

    /// Checks the whole object against an operator.
    fn validate_operator(&self, op: &dyn Operator, rhs: &dyn ObjectGraph) -> Status;

    /// Checks a property of the whole object.
    fn validate_property(&self, prop: Property, op: &dyn Operator, rhs: &dyn ObjectGraph)
    -> Status;

    /// Checks a property of one member against a fixed operand.
    fn validate_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status;

    /// Checks that a member's runtime existence matches `expected`.
    fn validate_exists(&self, member: &Member, expected: bool) -> Status;

    /// Checks one member against another member of the same object.
    fn validate_with_other_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        other: &Member,
    ) -> Status;

    /// Checks one member against the same member of a reference object.
    fn validate_with_master_sample(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        sample: &dyn ObjectGraph,
    ) -> Status;

    /// Called before an aggregation starts folding.
    fn on_aggregation_begin(&self, _kind: AggregationKind, _member: Option<&Member>) {}

    /// Called with the fold result before it propagates.
    fn on_aggregation_end(&self, _status: Status) {}

    /// Conjunction of child validators under `scope`.
    fn validate_and(&self, scope: &Member, children: &[Validator]) -> Status {
        self.on_aggregation_begin(AggregationKind::And, scoped(scope));
        let status = fold_and(children, |child| child.eval(self, scope));
        self.on_aggregation_end(status);
        status
    }

    /// Disjunction of child validators under `scope`.
    fn validate_or(&self, scope: &Member, children: &[Validator]) -> Status {
        self.on_aggregation_begin(AggregationKind::Or, scoped(scope));
        let status = fold_or(children, |child| child.eval(self, scope));
        self.on_aggregation_end(status);
        status
    }

    /// Negation of one validator under `scope`. `Ignore` is a fixed point.
    fn validate_not(&self, scope: &Member, inner: &Validator) -> Status {
        self.on_aggregation_begin(AggregationKind::Not, scoped(scope));
        let status = inner.eval(self, scope).negate();
        self.on_aggregation_end(status);
        status
    }

    /// Evaluates `inner` with `member` (joined under `scope`) as its scope.
    ///
    /// The scoped member's own existence is settled once per concrete
    /// path: infeasible paths are vacuous, absent ones follow the
    /// unknown-member policy, and only resolved ones run the inner tree.
    fn validate_nested(&self, scope: &Member, member: &Member, inner: &Validator) -> Status {
        let joined = scope.join(member);
        dispatch(self, &joined, |adapter, concrete| {
            with_member(adapter.object(), concrete.keys(), |found| match found {
                Found::Infeasible => Status::Ok,
                Found::Missing => adapter.config().not_found_status(),
                Found::Value(_) => inner.eval(adapter, concrete),
            })
        })
    }
}

fn scoped(scope: &Member) -> Option<&Member> {
    if scope.is_root() { None } else { Some(scope) }
}

// ============================================================================
// DEFAULT ADAPTER
// ============================================================================

/// Direct evaluation against one borrowed object.
pub struct DefaultAdapter<'a> {
    object: &'a dyn ObjectGraph,
    config: AdapterConfig,
}

impl fmt::Debug for DefaultAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> DefaultAdapter<'a> {
    /// Binds an object with the default configuration.
    pub fn new(object: &'a dyn ObjectGraph) -> Self {
        Self::with_config(object, AdapterConfig::default())
    }

    /// Binds an object with explicit configuration.
    pub fn with_config(object: &'a dyn ObjectGraph, config: AdapterConfig) -> Self {
        Self { object, config }
    }
}

impl Adapter for DefaultAdapter<'_> {
    fn object(&self) -> &dyn ObjectGraph {
        self.object
    }

    fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn validate_operator(&self, op: &dyn Operator, rhs: &dyn ObjectGraph) -> Status {
        Status::from(op.apply(self.object, rhs))
    }

    fn validate_property(
        &self,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status {
        match prop.read(self.object) {
            Some(value) => Status::from(op.apply(value.graph(), rhs)),
            None => Status::Ok,
        }
    }

    fn validate_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status {
        if self.config.check_member_exists {
            let gate = with_member(self.object, member.keys(), |found| match found {
                Found::Value(_) => None,
                Found::Missing => Some(self.config.not_found_status()),
                Found::Infeasible => Some(Status::Ok),
            });
            if let Some(status) = gate {
                return status;
            }
        }
        let status = with_member(self.object, member.keys(), |found| match found {
            Found::Infeasible => Status::Ok,
            Found::Missing => self.config.not_found_status(),
            Found::Value(node) => match prop.read(node) {
                Some(value) => Status::from(op.apply(value.graph(), rhs)),
                None => Status::Ok,
            },
        });
        tracing::trace!(member = %member, check = op.description(), ?status, "member check");
        status
    }

    fn validate_exists(&self, member: &Member, expected: bool) -> Status {
        Status::from(exists(self.object, member.keys()) == expected)
    }

    fn validate_with_other_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        other: &Member,
    ) -> Status {
        with_member(self.object, other.keys(), |found| match found {
            Found::Infeasible => Status::Ok,
            Found::Missing => self.config.not_found_status(),
            Found::Value(node) => match prop.read(node) {
                Some(value) => self.validate_member(member, prop, op, value.graph()),
                None => Status::Ok,
            },
        })
    }

    fn validate_with_master_sample(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        sample: &dyn ObjectGraph,
    ) -> Status {
        with_member(sample, member.keys(), |found| match found {
            Found::Infeasible => Status::Ok,
            Found::Missing => self.config.not_found_status(),
            Found::Value(node) => match prop.read(node) {
                Some(value) => self.validate_member(member, prop, op, value.graph()),
                None => Status::Ok,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::m;
    use crate::operators::{eq, gte};
    use crate::object::Scalar;
    use serde_json::json;

    #[test]
    fn member_leaf_against_fixed_operand() {
        let doc = json!({"age": 30});
        let adapter = DefaultAdapter::new(&doc);
        let rhs = Scalar::Int(18);
        let st = adapter.validate_member(&m("age"), Property::Value, &gte(), &rhs);
        assert_eq!(st, Status::Ok);
        let rhs = Scalar::Int(40);
        let st = adapter.validate_member(&m("age"), Property::Value, &gte(), &rhs);
        assert_eq!(st, Status::Fail);
    }

    #[test]
    fn absent_member_follows_policy() {
        let doc = json!({"age": 30});
        let rhs = Scalar::Int(1);

        let lenient = DefaultAdapter::new(&doc);
        let st = lenient.validate_member(&m("height"), Property::Value, &gte(), &rhs);
        assert_eq!(st, Status::Ignore);

        let strict = DefaultAdapter::with_config(
            &doc,
            AdapterConfig::default().unknown_member(UnknownMemberPolicy::Abort),
        );
        let st = strict.validate_member(&m("height"), Property::Value, &gte(), &rhs);
        assert_eq!(st, Status::Fail);
    }

    #[test]
    fn infeasible_member_is_vacuous_even_when_strict() {
        let doc = json!({"age": 30});
        let strict = DefaultAdapter::with_config(
            &doc,
            AdapterConfig::default()
                .unknown_member(UnknownMemberPolicy::Abort)
                .check_member_exists(true),
        );
        let rhs = Scalar::Int(0);
        // a name into a scalar never resolves for this shape
        let st = strict.validate_member(&m("age").key("x"), Property::Value, &gte(), &rhs);
        assert_eq!(st, Status::Ok);
    }

    #[test]
    fn debug_output_skips_the_object() {
        let doc = json!({"age": 30});
        let adapter = DefaultAdapter::new(&doc);
        let rendered = format!("{adapter:?}");
        assert!(rendered.starts_with("DefaultAdapter"));
        assert!(rendered.contains("config"));
    }

    #[test]
    fn other_member_comparison() {
        let doc = json!({"password": "s3cret", "confirm": "s3cret"});
        let adapter = DefaultAdapter::new(&doc);
        let st = adapter.validate_with_other_member(
            &m("confirm"),
            Property::Value,
            &eq(),
            &m("password"),
        );
        assert_eq!(st, Status::Ok);
    }

    #[test]
    fn master_sample_comparison() {
        let doc = json!({"version": 2});
        let sample = json!({"version": 2});
        let adapter = DefaultAdapter::new(&doc);
        let st = adapter.validate_with_master_sample(
            &m("version"),
            Property::Value,
            &eq(),
            &sample,
        );
        assert_eq!(st, Status::Ok);
    }
}
