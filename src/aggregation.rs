//! Aggregation folds and element-aggregation dispatch.
//!
//! Logical aggregation (`AND`/`OR`/`NOT`) folds child validators;
//! element aggregation (`ALL`/`ANY` markers inside a member path) expands
//! one abstract path into a run of concrete per-element paths. Both share
//! the same short-circuit discipline: `Ignore` is not a failure, so it
//! never breaks an `AND` fold and it *does* satisfy an `OR` fold.

use crate::adapter::Adapter;
use crate::foundation::Status;
use crate::member::{AggregationTarget, Found, Key, Member, with_member};
use crate::object::Scalar;

// ============================================================================
// KINDS AND FOLDS
// ============================================================================

/// The aggregation currently being bracketed, as seen by adapter hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationKind {
    /// Logical conjunction of validators.
    And,
    /// Logical disjunction of validators.
    Or,
    /// Logical negation of one validator.
    Not,
    /// Per-element conjunction over a container.
    All,
    /// Per-element disjunction over a container.
    Any,
}

impl AggregationKind {
    /// Upper-case token used in rendered failure descriptions.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            AggregationKind::And => "AND",
            AggregationKind::Or => "OR",
            AggregationKind::Not => "NOT",
            AggregationKind::All => "ALL",
            AggregationKind::Any => "ANY",
        }
    }
}

impl std::fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Conjunction fold: stops at the first `Fail`, otherwise `Ok`.
///
/// `Ignore` results are skipped over, so a chain of vacuous checks still
/// passes.
pub fn fold_and<T, F>(items: impl IntoIterator<Item = T>, mut f: F) -> Status
where
    F: FnMut(T) -> Status,
{
    for item in items {
        if f(item).is_fail() {
            return Status::Fail;
        }
    }
    Status::Ok
}

/// Disjunction fold: stops at the first non-`Fail` and returns it,
/// otherwise `Fail`.
pub fn fold_or<T, F>(items: impl IntoIterator<Item = T>, mut f: F) -> Status
where
    F: FnMut(T) -> Status,
{
    for item in items {
        let status = f(item);
        if !status.is_fail() {
            return status;
        }
    }
    Status::Fail
}

// ============================================================================
// ELEMENT DISPATCH
// ============================================================================

/// Runs `handler` once per concrete path named by `member`.
///
/// A path without aggregation markers dispatches straight to the handler.
/// Otherwise the path is split at its first marker, the prefix is resolved
/// to a container (or, for argument aggregation, kept as the call in
/// progress), and the handler runs against each generated concrete path;
/// markers deeper in the path expand recursively. Each expansion is
/// bracketed by the adapter's aggregation hooks.
pub fn dispatch<A, H>(adapter: &A, member: &Member, handler: H) -> Status
where
    A: Adapter + ?Sized,
    H: Fn(&A, &Member) -> Status,
{
    dispatch_inner(adapter, member, &handler)
}

fn dispatch_inner<A, H>(adapter: &A, member: &Member, handler: &H) -> Status
where
    A: Adapter + ?Sized,
    H: Fn(&A, &Member) -> Status,
{
    let Some((prefix, marker, rest)) = member.split_first_aggregation() else {
        return handler(adapter, member);
    };

    let (kind, expansion) = match marker {
        Key::All(target) => (AggregationKind::All, Expansion::Container(*target, Fold::All)),
        Key::Any(target) => (AggregationKind::Any, Expansion::Container(*target, Fold::Any)),
        Key::ArgsAll(c) => (AggregationKind::All, Expansion::Args(c, Fold::All)),
        Key::ArgsAny(c) => (AggregationKind::Any, Expansion::Args(c, Fold::Any)),
        // split_first_aggregation only stops at aggregation keys
        _ => return handler(adapter, member),
    };

    adapter.on_aggregation_begin(kind, Some(member));
    let status = match expansion {
        Expansion::Container(target, fold) => {
            expand_container(adapter, prefix, target, rest, handler, fold)
        }
        Expansion::Args(candidates, fold) => {
            expand_args(adapter, prefix, candidates, rest, handler, fold)
        }
    };
    adapter.on_aggregation_end(status);
    status
}

enum Expansion<'k> {
    Container(AggregationTarget, Fold),
    Args(&'k [Scalar], Fold),
}

#[derive(Clone, Copy)]
enum Fold {
    All,
    Any,
}

impl Fold {
    fn on_empty<A: Adapter + ?Sized>(self, adapter: &A) -> Status {
        match self {
            Fold::All => adapter.config().on_empty_all,
            Fold::Any => adapter.config().on_empty_any,
        }
    }
}

fn expand_container<A, H>(
    adapter: &A,
    prefix: &[Key],
    target: AggregationTarget,
    rest: &[Key],
    handler: &H,
    fold: Fold,
) -> Status
where
    A: Adapter + ?Sized,
    H: Fn(&A, &Member) -> Status,
{
    // Collect the concrete element keys up front; the element graphs are
    // re-resolved by key inside the handler, keeping borrows local.
    let element_keys = with_member(adapter.object(), prefix, |found| match found {
        Found::Infeasible => None,
        Found::Missing => Some(Err(adapter.config().not_found_status())),
        Found::Value(container) => match container.entries() {
            None => None,
            Some(entries) => Some(Ok(entries
                .map(|(key, _)| key)
                .collect::<Vec<Key>>())),
        },
    });

    let keys = match element_keys {
        None => return Status::Ok,
        Some(Err(status)) => return status,
        Some(Ok(keys)) => keys,
    };
    if keys.is_empty() {
        return fold.on_empty(adapter);
    }

    run_fold(fold, keys, |key| {
        let concrete = match target {
            AggregationTarget::Elements | AggregationTarget::Values => key,
            AggregationTarget::Keys => match key.to_scalar() {
                Some(scalar) => Key::KeyOf(scalar),
                // An element key with no scalar form cannot be validated
                // as a key; vacuous for this element.
                None => return Status::Ignore,
            },
            AggregationTarget::Pairs => match key.to_scalar() {
                Some(scalar) => Key::PairOf(scalar),
                None => return Status::Ignore,
            },
        };
        let member = concrete_member(prefix, concrete, rest);
        dispatch_inner(adapter, &member, handler)
    })
}

fn expand_args<A, H>(
    adapter: &A,
    prefix: &[Key],
    candidates: &[Scalar],
    rest: &[Key],
    handler: &H,
    fold: Fold,
) -> Status
where
    A: Adapter + ?Sized,
    H: Fn(&A, &Member) -> Status,
{
    if candidates.is_empty() {
        return fold.on_empty(adapter);
    }
    run_fold(fold, candidates.iter().cloned(), |candidate| {
        let member = concrete_member(prefix, Key::Arg(candidate), rest);
        dispatch_inner(adapter, &member, handler)
    })
}

fn run_fold<T>(
    fold: Fold,
    items: impl IntoIterator<Item = T>,
    mut f: impl FnMut(T) -> Status,
) -> Status {
    match fold {
        Fold::All => fold_and(items, &mut f),
        Fold::Any => fold_or(items, &mut f),
    }
}

fn concrete_member(prefix: &[Key], concrete: Key, rest: &[Key]) -> Member {
    Member::from_keys(
        prefix
            .iter()
            .cloned()
            .chain(std::iter::once(concrete))
            .chain(rest.iter().cloned()),
    )
}
