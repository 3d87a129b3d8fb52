//! Predicate abstraction used to filter sequences.

/// A named predicate over values of type `T`.
///
/// Implemented for any `Fn(&T) -> bool`, so closures can be passed wherever a
/// matcher is expected.
pub trait Matcher<T: ?Sized> {
    fn matches(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Matcher<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, value: &T) -> bool {
        self(value)
    }
}

/// How a list of matchers is combined.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchMode {
    /// Succeeds on the first matcher that accepts the value.
    Any,
    /// Fails on the first matcher that rejects the value.
    All,
}

/// Evaluate `matchers` against a single value.
///
/// An empty matcher list never matches. Otherwise evaluation short-circuits
/// according to `mode`; if it runs to the end, the last matcher decides.
pub fn match_one<T: ?Sized>(value: &T, matchers: &[&dyn Matcher<T>], mode: MatchMode) -> bool {
    let mut matched = false;
    for matcher in matchers {
        matched = matcher.matches(value);
        match (matched, mode) {
            (true, MatchMode::Any) => return true,
            (false, MatchMode::All) => return false,
            _ => {}
        }
    }
    matched
}
