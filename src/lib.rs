//! # Segtrie
//!
//! Segtrie is a path router built on a segment trie.
//!
//! Patterns are split on `/` and stored one segment per trie level. A request path is walked
//! through the trie and **every** pattern it reaches is returned, each with the parameters it
//! bound. There is no priority between overlapping patterns: if `/users/new` and `/users/:id`
//! are both registered, `/users/new` matches both, and the caller decides what to do with that.
//!
//! ## Features
//!
//! **All matches, in a stable order:** At each segment the router tries static children, then
//! parameters in the order they were registered, then a catch-all, then a wildcard. Results come
//! back in that discovery order.
//!
//! **Path auto-correction:** Lookups are case-insensitive by default. If the path as given does
//! not match, the router retries with repeated separators collapsed (`/a//b` as `/a/b`), and then
//! with trailing separators removed (`/a/b/` as `/a/b`). Each of these can be turned off with
//! [`Config`].
//!
//! **Constrained parameters:** A parameter can carry a regular expression that the whole segment
//! must match, a literal suffix, or both.
//!
//! **Handlers are yours:** A `Router<T>` stores any `T`. With `T = Box<dyn Handler>` the router
//! runs handler chains as a hyper service.
//!
//! ## Usage
//!
//! ```rust
//! use segtrie::Router;
//!
//! let mut router = Router::new();
//! router.insert("/", "index")?;
//! router.insert("/hello/:user", "hello")?;
//!
//! let matches = router.at("/hello/gordon");
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].handlers, [&"hello"]);
//! assert_eq!(matches[0].params.get("user"), Some("gordon"));
//! # Ok::<(), segtrie::ConfigurationError>(())
//! ```
//!
//! ## Pattern syntax
//!
//! ```ignore
//!  Syntax              Type
//!  :name               named parameter
//!  :name(regex)        named parameter, value must match regex
//!  :name+suffix        named parameter, segment must end with suffix
//!  :name(regex)+suffix both of the above
//!  :name*              catch-all parameter
//!  *                   wildcard
//!  ::text              the literal segment ":text"
//! ```
//!
//! ### Named parameters
//!
//! Named parameters match exactly one path segment:
//!
//! ```ignore
//! Pattern: /user/:user
//!
//!  /user/gordon              match
//!  /user/you                 match
//!  /user/gordon/profile      no match
//!  /user/                    match: user="" (the trailing separator leaves an empty segment)
//! ```
//!
//! With a constraint, the segment must match the expression from start to end. With a suffix,
//! the segment must end with it, and the parameter binds what comes before:
//!
//! ```ignore
//! Pattern: /item/:id(\d+)
//!
//!  /item/42                  match: id="42"
//!  /item/abc                 no match
//!
//! Pattern: /file/:name+.txt
//!
//!  /file/report.txt          match: name="report"
//!  /file/report.pdf          no match
//! ```
//!
//! ### Catch-All parameters
//!
//! Catch-all parameters bind every remaining segment, joined by `/`, including none at all.
//! A catch-all ends the match; anything registered below it is never reached.
//!
//! ```ignore
//! Pattern: /src/:filepath*
//!
//!  /src                      match: filepath=""
//!  /src/somefile.rs          match: filepath="somefile.rs"
//!  /src/subdir/somefile.rs   match: filepath="subdir/somefile.rs"
//! ```
//!
//! ### Wildcards
//!
//! A wildcard matches one or more remaining segments and binds nothing. Segments written after
//! a wildcard in a pattern are ignored.
//!
//! ```ignore
//! Pattern: /static/*
//!
//!  /static/css/site.css      match
//!  /static                   no match
//! ```
//!
//! ## Concurrency
//!
//! Routes are registered through `&mut Router` and looked up through `&Router`. Build the router
//! during setup, then share it; lookups never mutate it.

#![forbid(unsafe_code)]

mod error;
mod params;
pub mod path;
mod router;
pub mod segment;
pub mod service;
mod tree;

#[doc(inline)]
pub use error::ConfigurationError;
#[doc(inline)]
pub use params::{Param, Params};
#[doc(inline)]
pub use router::{Config, Match, Router};
#[doc(inline)]
pub use service::{Handler, HandlerFuture, Outcome};

#[doc(hidden)]
pub use service::{MakeRouterService, ResponseFut, RouterService};

// test the code examples in README.md
#[cfg(doctest)]
mod test_readme {
    macro_rules! doc_comment {
        ($x:expr) => {
            #[doc = $x]
            extern "C" {}
        };
    }

    doc_comment!(include_str!("../README.md"));
}
