//! Member path descriptors.
//!
//! A [`Member`] is an ordered sequence of heterogeneous [`Key`]s naming a
//! location inside an object graph, independent of any particular object.
//! Members are pure data: they are built once (usually through [`m`]) and
//! never mutated while a validator runs.

mod resolve;

pub use resolve::{Found, exists, with_member};

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::object::Scalar;
use crate::properties::Property;

// ============================================================================
// KEYS
// ============================================================================

/// What an element-aggregation marker ranges over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregationTarget {
    /// The container's elements (values, for mappings).
    #[default]
    Elements,
    /// The container's keys.
    Keys,
    /// The container's values, named explicitly.
    Values,
    /// The container's key/value pairs, each exposed as a two-entry
    /// mapping with `key` and `value` members.
    Pairs,
}

/// One step of a member path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Key {
    /// Named member of a mapping, or element of a set.
    Name(Cow<'static, str>),
    /// Positional element of a sequence.
    Index(usize),
    /// Property tag applied to the value reached so far.
    Prop(Property),
    /// Named accessor exposed by the object.
    Accessor(Cow<'static, str>),
    /// One bound argument of the preceding accessor.
    Arg(Scalar),
    /// All elements of the container reached so far must satisfy the rest.
    All(AggregationTarget),
    /// At least one element must satisfy the rest.
    Any(AggregationTarget),
    /// ALL over candidate accessor arguments.
    ArgsAll(Vec<Scalar>),
    /// ANY over candidate accessor arguments.
    ArgsAny(Vec<Scalar>),
    /// Engine-generated: the key itself at a mapping position (produced by
    /// `keys` aggregation).
    KeyOf(Scalar),
    /// Engine-generated: the key/value pair at a container position
    /// (produced by `pairs` aggregation).
    PairOf(Scalar),
}

impl Key {
    /// Whether this key expands into per-element sub-paths.
    #[must_use]
    pub fn is_aggregation(&self) -> bool {
        matches!(
            self,
            Key::All(_) | Key::Any(_) | Key::ArgsAll(_) | Key::ArgsAny(_)
        )
    }

    /// Scalar view of a concrete key, used when keys themselves are
    /// validated.
    #[must_use]
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            Key::Name(n) => Some(Scalar::Str(n.to_string())),
            Key::Index(i) => Some(Scalar::Uint(*i as u64)),
            Key::Arg(s) | Key::KeyOf(s) | Key::PairOf(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Key::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(Cow::Owned(name))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Key::Index(index as usize)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        // A negative index can never resolve; usize::MAX keeps it a
        // well-formed key that simply misses at runtime.
        Key::Index(usize::try_from(index).unwrap_or(usize::MAX))
    }
}

impl From<Property> for Key {
    fn from(prop: Property) -> Self {
        Key::Prop(prop)
    }
}

// ============================================================================
// MEMBER
// ============================================================================

/// An ordered key sequence identifying a location inside an object graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    keys: SmallVec<[Key; 4]>,
}

/// Starts a member path with its first key.
///
/// # Examples
///
/// ```rust,ignore
/// let path = m("user").key("emails").idx(0);
/// let rule = m("age").is(gte(), 18);
/// ```
pub fn m(key: impl Into<Key>) -> Member {
    Member::root().key(key)
}

impl Member {
    /// The empty path, denoting the object itself.
    #[must_use]
    pub fn root() -> Self {
        Member::default()
    }

    /// Whether this is the empty path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key sequence.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Builds a member from an iterator of keys.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Member {
            keys: keys.into_iter().collect(),
        }
    }

    /// Appends one key.
    #[must_use]
    pub fn key(mut self, key: impl Into<Key>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Appends a positional index.
    #[must_use]
    pub fn idx(self, index: usize) -> Self {
        self.key(Key::Index(index))
    }

    /// Appends a property tag.
    #[must_use]
    pub fn prop(self, prop: Property) -> Self {
        self.key(Key::Prop(prop))
    }

    /// Appends the `size` property tag.
    #[must_use]
    pub fn size(self) -> Self {
        self.prop(Property::Size)
    }

    /// Appends the `empty` property tag.
    #[must_use]
    pub fn empty(self) -> Self {
        self.prop(Property::Empty)
    }

    /// Requires the rest of the path to hold for all elements.
    #[must_use]
    pub fn all(self) -> Self {
        self.key(Key::All(AggregationTarget::Elements))
    }

    /// Requires the rest of the path to hold for at least one element.
    #[must_use]
    pub fn any(self) -> Self {
        self.key(Key::Any(AggregationTarget::Elements))
    }

    /// ALL over the container's keys.
    #[must_use]
    pub fn all_keys(self) -> Self {
        self.key(Key::All(AggregationTarget::Keys))
    }

    /// ANY over the container's keys.
    #[must_use]
    pub fn any_keys(self) -> Self {
        self.key(Key::Any(AggregationTarget::Keys))
    }

    /// ALL over the container's values.
    #[must_use]
    pub fn all_values(self) -> Self {
        self.key(Key::All(AggregationTarget::Values))
    }

    /// ANY over the container's values.
    #[must_use]
    pub fn any_values(self) -> Self {
        self.key(Key::Any(AggregationTarget::Values))
    }

    /// ALL over the container's key/value pairs.
    #[must_use]
    pub fn all_pairs(self) -> Self {
        self.key(Key::All(AggregationTarget::Pairs))
    }

    /// ANY over the container's key/value pairs.
    #[must_use]
    pub fn any_pairs(self) -> Self {
        self.key(Key::Any(AggregationTarget::Pairs))
    }

    /// Starts a named-accessor call; arguments are bound with
    /// [`MemberCall::arg`]. Only a call in progress accepts arguments, so a
    /// stray argument is unrepresentable.
    #[must_use]
    pub fn invoke(self, name: impl Into<Cow<'static, str>>) -> MemberCall {
        MemberCall {
            member: self.key(Key::Accessor(name.into())),
        }
    }

    /// Concatenates two paths (used for scoped nesting).
    #[must_use]
    pub fn join(&self, other: &Member) -> Member {
        if self.is_root() {
            return other.clone();
        }
        let mut keys = self.keys.clone();
        keys.extend(other.keys.iter().cloned());
        Member { keys }
    }

    /// Splits the path at its first element-aggregation key, if any.
    #[must_use]
    pub fn split_first_aggregation(&self) -> Option<(&[Key], &Key, &[Key])> {
        let i = self.keys.iter().position(Key::is_aggregation)?;
        Some((&self.keys[..i], &self.keys[i], &self.keys[i + 1..]))
    }

    /// Whether any key of the path is an aggregation marker.
    #[must_use]
    pub fn has_aggregation(&self) -> bool {
        self.keys.iter().any(Key::is_aggregation)
    }

    /// Structural path equality used by the single-member filter.
    ///
    /// Aggregation markers match any key at their position, a generated
    /// `KeyOf` matches the literal key it was produced from, and a path
    /// ending in a `size`/`empty` property tag is matched against the
    /// unsuffixed counterpart.
    #[must_use]
    pub fn path_type_eq(&self, other: &Member) -> bool {
        let a = strip_prop_suffix(&self.keys, &other.keys);
        let b = strip_prop_suffix(&other.keys, &self.keys);
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| key_matches(x, y))
    }
}

fn strip_prop_suffix<'a>(keys: &'a [Key], other: &[Key]) -> &'a [Key] {
    if keys.len() == other.len() + 1
        && matches!(
            keys.last(),
            Some(Key::Prop(Property::Size | Property::Empty))
        )
    {
        &keys[..keys.len() - 1]
    } else {
        keys
    }
}

fn key_matches(a: &Key, b: &Key) -> bool {
    if a.is_aggregation() || b.is_aggregation() {
        return true;
    }
    match (a, b) {
        (Key::Name(x), Key::Name(y)) => x == y,
        (Key::Index(x), Key::Index(y)) => x == y,
        (Key::Prop(x), Key::Prop(y)) => x == y,
        (Key::Accessor(x), Key::Accessor(y)) => x == y,
        (Key::Arg(x), Key::Arg(y))
        | (Key::KeyOf(x), Key::KeyOf(y))
        | (Key::PairOf(x), Key::PairOf(y)) => x == y,
        (Key::KeyOf(s) | Key::PairOf(s), Key::Name(n))
        | (Key::Name(n), Key::KeyOf(s) | Key::PairOf(s)) => {
            matches!(s, Scalar::Str(v) if v == n)
        }
        (Key::KeyOf(s) | Key::PairOf(s), Key::Index(i))
        | (Key::Index(i), Key::KeyOf(s) | Key::PairOf(s)) => s.as_index() == Some(*i),
        _ => false,
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, "<object>");
        }
        let mut first = true;
        for key in &self.keys {
            match key {
                Key::Name(n) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{n}")?;
                }
                Key::Index(i) => write!(f, "[{i}]")?,
                Key::Prop(p) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", p.name())?;
                }
                Key::Accessor(n) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{n}")?;
                }
                Key::Arg(s) => write!(f, "({s})")?,
                Key::All(t) => write!(f, "{}ALL{}", sep(first), target_suffix(*t))?,
                Key::Any(t) => write!(f, "{}ANY{}", sep(first), target_suffix(*t))?,
                Key::ArgsAll(_) => write!(f, "(ALL args)")?,
                Key::ArgsAny(_) => write!(f, "(ANY args)")?,
                Key::KeyOf(s) => write!(f, "{}key {s}", sep(first))?,
                Key::PairOf(s) => write!(f, "{}pair {s}", sep(first))?,
            }
            first = false;
        }
        Ok(())
    }
}

fn sep(first: bool) -> &'static str {
    if first { "" } else { "." }
}

fn target_suffix(target: AggregationTarget) -> &'static str {
    match target {
        AggregationTarget::Elements => "",
        AggregationTarget::Keys => " of keys",
        AggregationTarget::Values => " of values",
        AggregationTarget::Pairs => " of pairs",
    }
}

// ============================================================================
// ACCESSOR CALLS
// ============================================================================

/// A member path whose last step is an accessor call still binding
/// arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberCall {
    member: Member,
}

impl MemberCall {
    /// Binds the next accessor argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Scalar>) -> Self {
        self.member = self.member.key(Key::Arg(value.into()));
        self
    }

    /// ALL over candidate values for the next argument.
    #[must_use]
    pub fn arg_all<I, V>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let candidates = candidates.into_iter().map(Into::into).collect();
        self.member = self.member.key(Key::ArgsAll(candidates));
        self
    }

    /// ANY over candidate values for the next argument.
    #[must_use]
    pub fn arg_any<I, V>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let candidates = candidates.into_iter().map(Into::into).collect();
        self.member = self.member.key(Key::ArgsAny(candidates));
        self
    }

    /// Finishes the call and returns the plain member path.
    #[must_use]
    pub fn done(self) -> Member {
        self.member
    }
}

impl From<MemberCall> for Member {
    fn from(call: MemberCall) -> Self {
        call.member
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_keys() {
        let member = m("user").key("emails").idx(0).size();
        assert_eq!(member.keys().len(), 4);
        assert_eq!(member.to_string(), "user.emails[0].size");
    }

    #[test]
    fn join_prefixes() {
        let joined = m("a").join(&m("b").idx(1));
        assert_eq!(joined.to_string(), "a.b[1]");
        assert_eq!(Member::root().join(&m("x")), m("x"));
    }

    #[test]
    fn aggregation_split() {
        let member = m("tags").any().key("name");
        let (prefix, agg, rest) = member.split_first_aggregation().unwrap();
        assert_eq!(prefix.len(), 1);
        assert!(agg.is_aggregation());
        assert_eq!(rest.len(), 1);
        assert!(m("tags").split_first_aggregation().is_none());
    }

    #[test]
    fn path_type_equality() {
        assert!(m("a").idx(0).path_type_eq(&m("a").idx(0)));
        assert!(!m("a").idx(0).path_type_eq(&m("a").idx(1)));
        assert!(!m("a").path_type_eq(&m("b")));
        // aggregation markers are wildcards
        assert!(m("a").any().key("x").path_type_eq(&m("a").idx(3).key("x")));
        // size suffix matches the unsuffixed member
        assert!(m("a").size().path_type_eq(&m("a")));
        assert!(m("a").path_type_eq(&m("a").empty()));
        assert!(!m("a").key("b").path_type_eq(&m("a")));
    }

    #[test]
    fn accessor_calls_bind_args() {
        let member: Member = m("widget").invoke("child").arg(20).into();
        assert_eq!(member.keys().len(), 3);
        assert_eq!(member.to_string(), "widget.child(20)");
    }
}
