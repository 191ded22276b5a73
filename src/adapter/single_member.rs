//! Partial validation of a single member.
//!
//! [`SingleMemberAdapter`] wraps an adapter and turns every leaf check
//! whose member path does not structurally match the target into
//! `Ignore`. Matching uses [`Member::path_type_eq`], so aggregation
//! markers act as wildcards and a trailing `size`/`empty` tag matches the
//! unsuffixed target. Once evaluation enters an element aggregation over
//! a matching path, filtering is suspended for the bracket's duration so
//! the generated per-element paths are all checked.

use std::cell::{Cell, RefCell};

use crate::adapter::{Adapter, AdapterConfig};
use crate::aggregation::AggregationKind;
use crate::foundation::Status;
use crate::member::Member;
use crate::object::ObjectGraph;
use crate::operators::Operator;
use crate::properties::Property;

/// Adapter decorator restricting evaluation to one member path.
pub struct SingleMemberAdapter<A> {
    inner: A,
    target: Member,
    bypass: Cell<usize>,
    toggles: RefCell<Vec<bool>>,
}

impl<A: Adapter> SingleMemberAdapter<A> {
    /// Wraps an adapter, filtering for `target`.
    pub fn new(inner: A, target: impl Into<Member>) -> Self {
        Self {
            inner,
            target: target.into(),
            bypass: Cell::new(0),
            toggles: RefCell::new(Vec::new()),
        }
    }

    fn allows(&self, member: &Member) -> bool {
        self.bypass.get() > 0 || member.path_type_eq(&self.target)
    }
}

impl<A: Adapter> Adapter for SingleMemberAdapter<A> {
    fn object(&self) -> &dyn ObjectGraph {
        self.inner.object()
    }

    fn config(&self) -> &AdapterConfig {
        self.inner.config()
    }

    fn validate_operator(&self, op: &dyn Operator, rhs: &dyn ObjectGraph) -> Status {
        if self.allows(&Member::root()) {
            self.inner.validate_operator(op, rhs)
        } else {
            Status::Ignore
        }
    }

    fn validate_property(
        &self,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status {
        if self.allows(&Member::root()) {
            self.inner.validate_property(prop, op, rhs)
        } else {
            Status::Ignore
        }
    }

    fn validate_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status {
        if self.allows(member) {
            self.inner.validate_member(member, prop, op, rhs)
        } else {
            Status::Ignore
        }
    }

    fn validate_exists(&self, member: &Member, expected: bool) -> Status {
        if self.allows(member) {
            self.inner.validate_exists(member, expected)
        } else {
            Status::Ignore
        }
    }

    fn validate_with_other_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        other: &Member,
    ) -> Status {
        if self.allows(member) {
            self.inner.validate_with_other_member(member, prop, op, other)
        } else {
            Status::Ignore
        }
    }

    fn validate_with_master_sample(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        sample: &dyn ObjectGraph,
    ) -> Status {
        if self.allows(member) {
            self.inner
                .validate_with_master_sample(member, prop, op, sample)
        } else {
            Status::Ignore
        }
    }

    fn on_aggregation_begin(&self, kind: AggregationKind, member: Option<&Member>) {
        let element_bracket = matches!(kind, AggregationKind::All | AggregationKind::Any);
        let toggled = element_bracket
            && (self.bypass.get() > 0
                || member.is_some_and(|m| m.path_type_eq(&self.target)));
        self.toggles.borrow_mut().push(toggled);
        if toggled {
            self.bypass.set(self.bypass.get() + 1);
        }
        self.inner.on_aggregation_begin(kind, member);
    }

    fn on_aggregation_end(&self, status: Status) {
        if self.toggles.borrow_mut().pop() == Some(true) {
            self.bypass.set(self.bypass.get() - 1);
        }
        self.inner.on_aggregation_end(status);
    }
}
