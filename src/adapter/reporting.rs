//! Failure reporting.
//!
//! [`ReportingAdapter`] decorates any adapter and feeds every failed leaf
//! check, plus the aggregation brackets around it, to a [`Reporter`].
//! [`DefaultReporter`] renders those callbacks into one human-readable
//! failure description; custom reporters (translation, structured output)
//! implement the same trait.

use std::cell::RefCell;

use crate::adapter::{Adapter, AdapterConfig};
use crate::aggregation::AggregationKind;
use crate::foundation::{Report, Status};
use crate::member::Member;
use crate::object::ObjectGraph;
use crate::operators::Operator;
use crate::properties::Property;

// ============================================================================
// REPORTER
// ============================================================================

/// Sink for validation failure descriptions.
///
/// Leaf callbacks fire only for failed checks. Aggregation brackets fire
/// for every aggregation, failed or not; `aggregate_end` carries the fold
/// result so the reporter can discard brackets that passed.
pub trait Reporter {
    /// A whole-object operator check failed.
    fn report_operator(&mut self, op: &dyn Operator, rhs: &dyn ObjectGraph);

    /// A whole-object property check failed.
    fn report_property(&mut self, prop: Property, op: &dyn Operator, rhs: &dyn ObjectGraph);

    /// A member check against a fixed operand failed.
    fn report_member(
        &mut self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    );

    /// An existence check failed.
    fn report_exists(&mut self, member: &Member, expected: bool);

    /// A check against another member of the same object failed.
    fn report_other_member(
        &mut self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        other: &Member,
    );

    /// A check against the master sample failed.
    fn report_master_sample(&mut self, member: &Member, prop: Property, op: &dyn Operator);

    /// An aggregation fold is starting.
    fn aggregate_begin(&mut self, kind: AggregationKind, member: Option<&Member>);

    /// The innermost open aggregation finished with `status`.
    fn aggregate_end(&mut self, status: Status);
}

// ============================================================================
// REPORTING ADAPTER
// ============================================================================

/// Adapter decorator that reports failures.
///
/// The reporter sits behind a `RefCell` because adapters are shared
/// immutably during evaluation while reporting is inherently stateful.
pub struct ReportingAdapter<A, R> {
    inner: A,
    reporter: RefCell<R>,
}

impl<A: Adapter, R: Reporter> ReportingAdapter<A, R> {
    /// Wraps an adapter with a reporter.
    pub fn new(inner: A, reporter: R) -> Self {
        Self {
            inner,
            reporter: RefCell::new(reporter),
        }
    }

    /// Unwraps the reporter once evaluation is done.
    pub fn into_reporter(self) -> R {
        self.reporter.into_inner()
    }
}

impl<A: Adapter, R: Reporter> Adapter for ReportingAdapter<A, R> {
    fn object(&self) -> &dyn ObjectGraph {
        self.inner.object()
    }

    fn config(&self) -> &AdapterConfig {
        self.inner.config()
    }

    fn validate_operator(&self, op: &dyn Operator, rhs: &dyn ObjectGraph) -> Status {
        let status = self.inner.validate_operator(op, rhs);
        if status.is_fail() {
            self.reporter.borrow_mut().report_operator(op, rhs);
        }
        status
    }

    fn validate_property(
        &self,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status {
        let status = self.inner.validate_property(prop, op, rhs);
        if status.is_fail() {
            self.reporter.borrow_mut().report_property(prop, op, rhs);
        }
        status
    }

    fn validate_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) -> Status {
        let status = self.inner.validate_member(member, prop, op, rhs);
        if status.is_fail() {
            self.reporter
                .borrow_mut()
                .report_member(member, prop, op, rhs);
        }
        status
    }

    fn validate_exists(&self, member: &Member, expected: bool) -> Status {
        let status = self.inner.validate_exists(member, expected);
        if status.is_fail() {
            self.reporter.borrow_mut().report_exists(member, expected);
        }
        status
    }

    fn validate_with_other_member(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        other: &Member,
    ) -> Status {
        let status = self
            .inner
            .validate_with_other_member(member, prop, op, other);
        if status.is_fail() {
            self.reporter
                .borrow_mut()
                .report_other_member(member, prop, op, other);
        }
        status
    }

    fn validate_with_master_sample(
        &self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        sample: &dyn ObjectGraph,
    ) -> Status {
        let status = self
            .inner
            .validate_with_master_sample(member, prop, op, sample);
        if status.is_fail() {
            self.reporter
                .borrow_mut()
                .report_master_sample(member, prop, op);
        }
        status
    }

    fn on_aggregation_begin(&self, kind: AggregationKind, member: Option<&Member>) {
        self.reporter.borrow_mut().aggregate_begin(kind, member);
        self.inner.on_aggregation_begin(kind, member);
    }

    fn on_aggregation_end(&self, status: Status) {
        self.reporter.borrow_mut().aggregate_end(status);
        self.inner.on_aggregation_end(status);
    }
}

// ============================================================================
// DEFAULT REPORTER
// ============================================================================

struct Frame {
    kind: AggregationKind,
    member: Option<String>,
    parts: Vec<String>,
}

/// Renders failures into one English sentence.
///
/// Aggregation brackets become parenthesized groups joined with the
/// aggregation token; brackets that passed leave no trace.
#[derive(Default)]
pub struct DefaultReporter {
    frames: Vec<Frame>,
    parts: Vec<String>,
}

impl DefaultReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated description, empty when nothing failed.
    #[must_use]
    pub fn message(&self) -> String {
        self.parts.join(" AND ")
    }

    /// Finishes reporting into a [`Report`] with the final status.
    #[must_use]
    pub fn into_report(self, status: Status) -> Report {
        Report::new(status, self.message())
    }

    fn push(&mut self, part: String) {
        match self.frames.last_mut() {
            Some(frame) => frame.parts.push(part),
            None => self.parts.push(part),
        }
    }
}

fn subject(member: &Member, prop: Property) -> String {
    match prop {
        Property::Value => member.to_string(),
        _ => format!("{} of {}", prop.name(), member),
    }
}

impl Reporter for DefaultReporter {
    fn report_operator(&mut self, op: &dyn Operator, rhs: &dyn ObjectGraph) {
        self.push(format!("object {} {}", op.description(), rhs.describe()));
    }

    fn report_property(&mut self, prop: Property, op: &dyn Operator, rhs: &dyn ObjectGraph) {
        self.push(format!(
            "{} of object {} {}",
            prop.name(),
            op.description(),
            rhs.describe()
        ));
    }

    fn report_member(
        &mut self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        rhs: &dyn ObjectGraph,
    ) {
        self.push(format!(
            "{} {} {}",
            subject(member, prop),
            op.description(),
            rhs.describe()
        ));
    }

    fn report_exists(&mut self, member: &Member, expected: bool) {
        let phrase = if expected { "must exist" } else { "must not exist" };
        self.push(format!("{member} {phrase}"));
    }

    fn report_other_member(
        &mut self,
        member: &Member,
        prop: Property,
        op: &dyn Operator,
        other: &Member,
    ) {
        self.push(format!(
            "{} {} {}",
            subject(member, prop),
            op.description(),
            subject(other, prop)
        ));
    }

    fn report_master_sample(&mut self, member: &Member, prop: Property, op: &dyn Operator) {
        self.push(format!(
            "{} {} the same member of the sample",
            subject(member, prop),
            op.description()
        ));
    }

    fn aggregate_begin(&mut self, kind: AggregationKind, member: Option<&Member>) {
        self.frames.push(Frame {
            kind,
            member: member.map(Member::to_string),
            parts: Vec::new(),
        });
    }

    fn aggregate_end(&mut self, status: Status) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        if !status.is_fail() {
            return;
        }
        // A bracket can fail with no reported leaves: an ANY over an empty
        // container fails before any element check runs. Synthesize a
        // phrase so the report still names the unmet condition.
        if frame.parts.is_empty() {
            let rendered = match frame.member {
                Some(member) => {
                    format!("no element of {member} satisfies the condition")
                }
                None => "a required condition failed".to_owned(),
            };
            self.push(rendered);
            return;
        }
        let rendered = match frame.kind {
            AggregationKind::Not => format!("NOT ({})", frame.parts.join(" AND ")),
            AggregationKind::And => group(frame.parts.join(" AND ")),
            AggregationKind::Or => group(frame.parts.join(" OR ")),
            AggregationKind::All => match frame.member {
                Some(member) => {
                    format!(
                        "for each element of {member}: {}",
                        frame.parts.join(" AND ")
                    )
                }
                None => group(frame.parts.join(" AND ")),
            },
            AggregationKind::Any => match frame.member {
                Some(member) => {
                    format!(
                        "for at least one element of {member}: {}",
                        frame.parts.join(" OR ")
                    )
                }
                None => group(frame.parts.join(" OR ")),
            },
        };
        self.push(rendered);
    }
}

fn group(joined: String) -> String {
    if joined.contains(" AND ") || joined.contains(" OR ") {
        format!("({joined})")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::m;
    use crate::object::Scalar;
    use crate::operators::gte;

    #[test]
    fn renders_member_failures() {
        let mut reporter = DefaultReporter::new();
        let rhs = Scalar::Int(18);
        reporter.report_member(&m("age"), Property::Value, &gte(), &rhs);
        assert_eq!(reporter.message(), "age must be greater than or equal to 18");
    }

    #[test]
    fn passing_brackets_leave_no_trace() {
        let mut reporter = DefaultReporter::new();
        reporter.aggregate_begin(AggregationKind::Or, None);
        reporter.report_exists(&m("a"), true);
        reporter.aggregate_end(Status::Ok);
        assert_eq!(reporter.message(), "");
    }

    #[test]
    fn failed_or_bracket_groups_parts() {
        let mut reporter = DefaultReporter::new();
        reporter.aggregate_begin(AggregationKind::Or, None);
        reporter.report_exists(&m("a"), true);
        reporter.report_exists(&m("b"), true);
        reporter.aggregate_end(Status::Fail);
        assert_eq!(reporter.message(), "(a must exist OR b must exist)");
    }

    #[test]
    fn failed_empty_bracket_names_the_member() {
        let mut reporter = DefaultReporter::new();
        reporter.aggregate_begin(AggregationKind::Any, Some(&m("items").any()));
        reporter.aggregate_end(Status::Fail);
        assert_eq!(
            reporter.message(),
            "no element of items.ANY satisfies the condition"
        );
    }

    #[test]
    fn size_property_phrasing() {
        assert_eq!(subject(&m("tags"), Property::Size), "size of tags");
        assert_eq!(subject(&m("tags"), Property::Value), "tags");
    }
}
