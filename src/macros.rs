//! Convenience macros for building rule trees.

/// Conjunction of the listed validators.
///
/// # Examples
///
/// ```rust,ignore
/// let rule = all_of![
///     m("age").is(gte(), 18),
///     m("name").exists(true),
/// ];
/// ```
#[macro_export]
macro_rules! all_of {
    ($($validator:expr),+ $(,)?) => {
        $crate::combinators::and(vec![$($validator),+])
    };
}

/// Disjunction of the listed validators.
#[macro_export]
macro_rules! any_of {
    ($($validator:expr),+ $(,)?) => {
        $crate::combinators::or(vec![$($validator),+])
    };
}

/// Member path from a sequence of keys.
///
/// # Examples
///
/// ```rust,ignore
/// let path = member!("user", "emails", 0);
/// ```
#[macro_export]
macro_rules! member {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::member::m($first)$(.key($rest))*
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::Status;
    use crate::member::m;
    use crate::operators::{eq, gte};
    use serde_json::json;

    #[test]
    fn macro_built_rules() {
        let doc = json!({"user": {"emails": ["a@x"]}, "age": 30});
        let rule = all_of![
            member!("user", "emails").size().is(gte(), 1u64),
            any_of![m("age").is(gte(), 18), m("age").is(eq(), 0)],
        ];
        assert_eq!(rule.apply(&doc), Status::Ok);
    }
}
