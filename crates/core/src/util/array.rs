//! Null-tolerant helpers over ordered sequences.
//!
//! A missing sequence is modelled as `None` and behaves like an empty one for
//! size and membership queries. Index and length arguments are signed so that
//! negative values coming from callers (query strings, form fields) clamp the
//! same way regardless of where they originated.

use core::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use super::matcher::{MatchMode, Matcher, match_one};

/// Number of elements, `0` for a missing sequence.
pub fn length<T>(array: Option<&[T]>) -> usize {
    array.map_or(0, <[T]>::len)
}

/// Whether the sequence is missing or has no elements.
pub fn is_empty<T>(array: Option<&[T]>) -> bool {
    length(array) == 0
}

pub fn is_not_empty<T>(array: Option<&[T]>) -> bool {
    !is_empty(array)
}

/// Whether `array` holds an element equal to `target`.
///
/// Equality is value equality; for `Option` elements `None` equals `None`.
pub fn contains<T: PartialEq>(array: Option<&[T]>, target: &T) -> bool {
    array.is_some_and(|items| items.contains(target))
}

/// Whether `array` holds at least one of `targets`.
pub fn contains_any<T: PartialEq>(array: Option<&[T]>, targets: &[T]) -> bool {
    if is_empty(array) || targets.is_empty() {
        return false;
    }
    targets.iter().any(|t| contains(array, t))
}

/// Whether `array` holds every one of `targets`.
///
/// An empty `targets` list yields `false`: no requirement was satisfied.
pub fn contains_all<T: PartialEq>(array: Option<&[T]>, targets: &[T]) -> bool {
    if is_empty(array) || targets.is_empty() {
        return false;
    }
    targets.iter().all(|t| contains(array, t))
}

/// Bounds-checked element access.
pub fn get_element<T>(array: Option<&[T]>, index: isize) -> Option<&T> {
    let index = usize::try_from(index).ok()?;
    array?.get(index)
}

/// Bounds-checked element access with a fallback.
pub fn get_element_or<'a, T>(array: Option<&'a [T]>, index: isize, default: &'a T) -> &'a T {
    get_element(array, index).unwrap_or(default)
}

/// Copy out up to `length` elements starting at `start`.
///
/// Returns `None` only when the source itself is missing. A negative `start`
/// is clamped to `0` and `length` is clamped to what remains.
pub fn get_elements<T: Clone>(array: Option<&[T]>, start: isize, length: isize) -> Option<Vec<T>> {
    let items = array?;
    let start = usize::try_from(start).unwrap_or(0);
    let Ok(length) = usize::try_from(length) else {
        return Some(Vec::new());
    };
    if start >= items.len() || length == 0 {
        return Some(Vec::new());
    }
    let end = start.saturating_add(length).min(items.len());
    Some(items[start..end].to_vec())
}

fn chunk_len(len: usize, chunk: isize) -> usize {
    match usize::try_from(chunk) {
        Ok(n) if n > 0 => n,
        _ => len,
    }
}

/// Partition into consecutive chunks of `chunk` elements.
///
/// A non-positive `chunk` means "one chunk holding everything". The final
/// chunk may be shorter. An empty source yields a single empty chunk.
pub fn split<T: Clone>(array: Option<&[T]>, chunk: isize) -> Option<Vec<Vec<T>>> {
    let items = array?;
    if items.is_empty() {
        return Some(vec![Vec::new()]);
    }
    let size = chunk_len(items.len(), chunk);
    Some(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Like [`split`], but every chunk has exactly `chunk` slots; the tail of the
/// last chunk is filled with `None`.
///
/// A `chunk` larger than the source is capped at the source length, so the
/// result is then a single unpadded chunk.
pub fn split_padded<T: Clone>(array: Option<&[T]>, chunk: isize) -> Option<Vec<Vec<Option<T>>>> {
    let items = array?;
    if items.is_empty() {
        return Some(vec![Vec::new()]);
    }
    let size = chunk_len(items.len(), chunk).min(items.len());
    Some(
        items
            .chunks(size)
            .map(|part| {
                let mut slots: Vec<Option<T>> = part.iter().cloned().map(Some).collect();
                slots.resize(size, None);
                slots
            })
            .collect(),
    )
}

pub fn as_list<T>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    items.into_iter().collect()
}

/// Deduplicated set that keeps first-insertion order.
pub fn as_set<T: Eq + Hash>(items: impl IntoIterator<Item = T>) -> IndexSet<T> {
    items.into_iter().collect()
}

/// Build a map from alternating keys and values.
///
/// With an odd number of elements the last key maps to `None`. Repeated keys
/// keep their first position and take the latest value.
pub fn as_map<T: Eq + Hash + Clone>(items: &[T]) -> IndexMap<T, Option<T>> {
    items
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair.get(1).cloned()))
        .collect()
}

/// Build a map from `[key, value, ..]` entries.
///
/// Entries with fewer than two elements are skipped; extra elements ignored.
pub fn as_map_from_pairs<T, P>(pairs: &[P]) -> IndexMap<T, T>
where
    T: Eq + Hash + Clone,
    P: AsRef<[T]>,
{
    pairs
        .iter()
        .filter_map(|pair| match pair.as_ref() {
            [key, value, ..] => Some((key.clone(), value.clone())),
            _ => None,
        })
        .collect()
}

/// Keep the elements accepted by `matcher`.
pub fn matches<T: Clone>(array: Option<&[T]>, matcher: &dyn Matcher<T>) -> Option<Vec<T>> {
    match_all(array, &[matcher])
}

/// Keep the elements accepted by at least one matcher.
///
/// Returns `None` when either the source or the matcher list is empty.
pub fn match_any<T: Clone>(array: Option<&[T]>, matchers: &[&dyn Matcher<T>]) -> Option<Vec<T>> {
    filter(array, matchers, MatchMode::Any)
}

/// Keep the elements accepted by every matcher.
///
/// Returns `None` when either the source or the matcher list is empty.
pub fn match_all<T: Clone>(array: Option<&[T]>, matchers: &[&dyn Matcher<T>]) -> Option<Vec<T>> {
    filter(array, matchers, MatchMode::All)
}

fn filter<T: Clone>(
    array: Option<&[T]>,
    matchers: &[&dyn Matcher<T>],
    mode: MatchMode,
) -> Option<Vec<T>> {
    let items = array.filter(|items| !items.is_empty())?;
    if matchers.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .filter(|item| match_one(*item, matchers, mode))
            .cloned()
            .collect(),
    )
}
