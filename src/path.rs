//! Path normalization for registration and lookup.
//!
//! Registered patterns are normalized once with [`normalize_for_storage`].
//! Request paths are case folded with [`fold_case`] and split into segments
//! with [`match_segments`], which the router calls once per lookup variant.
use std::borrow::Cow;

const SEPARATOR: char = '/';

/// Normalizes a registered pattern.
///
/// Leading and trailing separators are trimmed, the pattern is lowercased
/// if `ignore_case` is set, and runs of separators collapse to one if
/// `fixed_path` is set.
/// ```rust
/// use segtrie::path::normalize_for_storage;
///
/// assert_eq!(normalize_for_storage("//API//Users/", true, true), "api/users");
/// assert_eq!(normalize_for_storage("/API//Users/", false, false), "API//Users");
/// ```
pub fn normalize_for_storage(path: &str, ignore_case: bool, fixed_path: bool) -> String {
    let trimmed = path.trim_matches(SEPARATOR);
    let folded = fold_case(trimmed, ignore_case);

    if !fixed_path {
        return folded.into_owned();
    }

    let mut out = String::with_capacity(folded.len());
    let mut prev_sep = false;
    for c in folded.chars() {
        if c == SEPARATOR {
            if !prev_sep {
                out.push(c);
            }
            prev_sep = true;
        } else {
            out.push(c);
            prev_sep = false;
        }
    }
    out
}

/// Lowercases `path` if `ignore_case` is set, borrowing otherwise.
pub fn fold_case(path: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(path.to_lowercase())
    } else {
        Cow::Borrowed(path)
    }
}

/// Splits a request path into the segments the trie is searched with.
///
/// Leading empty segments are always dropped. Empty segments between the
/// first and last non-empty ones are dropped only with `fixed_path`, so
/// `//` in the middle of a path otherwise becomes an empty segment.
///
/// Trailing empty segments are dropped with `trailing_slash`. Without it
/// they are kept: one empty segment if `fixed_path` is set, all of them if
/// not. That keeps `/foo/` and `/foo//` distinguishable in the exact
/// lookup.
/// ```rust
/// use segtrie::path::match_segments;
///
/// assert_eq!(match_segments("/a//b/", false, false), ["a", "", "b", ""]);
/// assert_eq!(match_segments("/a//b//", true, false), ["a", "b", ""]);
/// assert_eq!(match_segments("/a//b//", true, true), ["a", "b"]);
/// ```
pub fn match_segments(path: &str, fixed_path: bool, trailing_slash: bool) -> Vec<&str> {
    let tokens: Vec<&str> = path.split(SEPARATOR).collect();

    let first = match tokens.iter().position(|t| !t.is_empty()) {
        Some(first) => first,
        None => return Vec::new(),
    };
    // a non-empty token exists, so the reverse search cannot miss
    let last = tokens.iter().rposition(|t| !t.is_empty()).unwrap_or(first);
    let trailing = tokens.len() - 1 - last;

    let mut segments: Vec<&str> = tokens[first..=last]
        .iter()
        .copied()
        .filter(|t| !fixed_path || !t.is_empty())
        .collect();

    if !trailing_slash && trailing > 0 {
        let keep = if fixed_path { 1 } else { trailing };
        segments.extend(std::iter::repeat("").take(keep));
    }

    segments
}
