//! Classification of a single pattern segment.
//!
//! Every segment of a registered pattern is one of seven shapes:
//! ```ignore
//!  Syntax              Kind
//!  users               static
//!  ::users             static, the leading `:` is escaped (matches ":users")
//!  :id                 named parameter
//!  :id(\d+)            named parameter with a pattern constraint
//!  :name+.txt          named parameter with a literal suffix
//!  :id(\d+)+.json      named parameter with a pattern and a suffix
//!  :rest*              catch-all parameter
//!  *                   wildcard
//! ```
//! Classification never fails. Anything that is not recognized as a
//! parameter is a static segment.
use once_cell::sync::Lazy;
use regex::Regex;

const PARAM: char = ':';
const ESCAPE: &str = "::";
const WILDCARD: &str = "*";
const CATCH_ALL: char = '*';

static SUFFIXED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:(\w+)(?:\((.+)\))?\+(.+)$").expect("suffixed segment regex is valid")
});

static CONSTRAINED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:(\w+)\((.+)\)$").expect("constrained segment regex is valid"));

/// A classified pattern segment, borrowing from the pattern it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Static(&'a str),
    Named {
        name: &'a str,
    },
    Constrained {
        name: &'a str,
        pattern: &'a str,
    },
    Suffixed {
        name: &'a str,
        suffix: &'a str,
    },
    ConstrainedSuffixed {
        name: &'a str,
        pattern: &'a str,
        suffix: &'a str,
    },
    CatchAll {
        name: &'a str,
    },
    Wildcard,
}

/// Classifies a raw pattern segment.
///
/// The checks run in a fixed order, so `:id(\d+)+json` is a constrained
/// parameter with a `json` suffix, never a constrained parameter followed by
/// literal text.
/// ```rust
/// use segtrie::segment::{classify, Segment};
///
/// assert_eq!(classify("users"), Segment::Static("users"));
/// assert_eq!(classify("::users"), Segment::Static(":users"));
/// assert_eq!(classify(":rest*"), Segment::CatchAll { name: "rest" });
/// assert_eq!(
///     classify(r":id(\d+)+json"),
///     Segment::ConstrainedSuffixed { name: "id", pattern: r"\d+", suffix: "json" }
/// );
/// ```
pub fn classify(segment: &str) -> Segment<'_> {
    if segment.starts_with(ESCAPE) {
        // drop one of the two markers, the other is literal
        return Segment::Static(&segment[1..]);
    }

    if segment == WILDCARD {
        return Segment::Wildcard;
    }

    if segment.starts_with(PARAM) && segment.ends_with(CATCH_ALL) {
        return Segment::CatchAll {
            name: &segment[1..segment.len() - 1],
        };
    }

    if let Some(caps) = SUFFIXED.captures(segment) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let suffix = caps.get(3).map_or("", |m| m.as_str());
        return match caps.get(2) {
            Some(pattern) => Segment::ConstrainedSuffixed {
                name,
                pattern: pattern.as_str(),
                suffix,
            },
            None => Segment::Suffixed { name, suffix },
        };
    }

    if let Some(caps) = CONSTRAINED.captures(segment) {
        return Segment::Constrained {
            name: caps.get(1).map_or("", |m| m.as_str()),
            pattern: caps.get(2).map_or("", |m| m.as_str()),
        };
    }

    if let Some(name) = segment.strip_prefix(PARAM) {
        return Segment::Named { name };
    }

    Segment::Static(segment)
}
