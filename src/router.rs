//! [`Router`](crate::Router) maps path patterns to handlers and finds every
//! pattern a request path matches.
//!
//! Registration and lookup are separate phases. Routes are inserted through
//! `&mut self` while the application is being configured; lookups go through
//! `&self`, so once the router is shared (for example behind an `Arc`) it
//! can serve any number of threads without locking.
//!
//! ```rust
//! use segtrie::Router;
//!
//! let mut router = Router::new();
//! router.insert("/users/:id", "user")?;
//! router.insert(r"/users/:id(\d+)", "user by number")?;
//!
//! let matches = router.at("/users/42");
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].params.get("id"), Some("42"));
//! assert_eq!(matches[1].handlers, [&"user by number"]);
//!
//! assert_eq!(router.at("/users/alice").len(), 1);
//! assert!(router.at("/posts").is_empty());
//! # Ok::<(), segtrie::ConfigurationError>(())
//! ```
//!
//! A lookup first tries the path as given. If nothing matches and
//! `Config::fixed_path` is set, it retries with repeated separators
//! collapsed, and then, if `Config::trailing_slash` is set, with trailing
//! separators removed as well. The first attempt that matches anything wins.
use crate::error::ConfigurationError;
use crate::params::Params;
use crate::path::{fold_case, match_segments, normalize_for_storage};
use crate::tree::{Node, Step};

use serde::{Deserialize, Serialize};

/// Normalization options, fixed when the router is created.
///
/// All options default to `true`. The struct can be embedded in an
/// application's configuration file; missing keys take their defaults.
/// ```rust
/// use segtrie::Config;
///
/// let config = Config::default().trailing_slash(false);
/// assert!(config.ignore_case);
/// assert!(!config.trailing_slash);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Match paths case-insensitively. Patterns and paths are lowercased,
    /// parameter names and constraint patterns included, and constraints
    /// compile case-insensitively.
    pub ignore_case: bool,
    /// Collapse repeated separators, so `/a//b` can match `/a/b`.
    pub fixed_path: bool,
    /// Ignore trailing separators, so `/a/b/` can match `/a/b`.
    pub trailing_slash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_case: true,
            fixed_path: true,
            trailing_slash: true,
        }
    }
}

impl Config {
    pub fn ignore_case(mut self, enabled: bool) -> Self {
        self.ignore_case = enabled;
        self
    }

    pub fn fixed_path(mut self, enabled: bool) -> Self {
        self.fixed_path = enabled;
        self
    }

    pub fn trailing_slash(mut self, enabled: bool) -> Self {
        self.trailing_slash = enabled;
        self
    }
}

/// One route reached by a lookup: the parameters bound on the way there
/// and every handler registered for that route, in registration order.
#[derive(Debug)]
pub struct Match<'a, T> {
    pub params: Params,
    pub handlers: Vec<&'a T>,
}

#[derive(Debug)]
struct Route<T> {
    pattern: String,
    handler: T,
}

/// The three ways a request path is segmented, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Exact,
    FixedPath,
    TrailingSlash,
}

impl Lookup {
    const ALL: [Lookup; 3] = [Lookup::Exact, Lookup::FixedPath, Lookup::TrailingSlash];

    fn enabled(self, config: &Config) -> bool {
        match self {
            Lookup::Exact => true,
            Lookup::FixedPath => config.fixed_path,
            Lookup::TrailingSlash => config.trailing_slash,
        }
    }

    /// Returns the `(fixed_path, trailing_slash)` flags for segmenting.
    fn flags(self, config: &Config) -> (bool, bool) {
        match self {
            Lookup::Exact => (false, false),
            Lookup::FixedPath => (true, false),
            Lookup::TrailingSlash => (config.fixed_path, true),
        }
    }
}

/// Router dispatches paths to handlers via registered patterns.
///
/// A path may match several patterns at once. [`Router::at`] returns all of
/// them and leaves the choice to the caller.
#[derive(Debug)]
pub struct Router<T> {
    root: Node,
    routes: Vec<Route<T>>,
    config: Config,
}

impl<T> Router<T> {
    /// Creates a router with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            root: Node::default(),
            routes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers `handler` for `pattern`.
    ///
    /// Registering the same pattern again adds another handler to the same
    /// route; both are returned, in order, when it matches. The only error
    /// is a constrained parameter whose pattern does not compile, in which
    /// case the router is left unchanged.
    /// ```rust
    /// use segtrie::{ConfigurationError, Router};
    ///
    /// let mut router = Router::new();
    /// router.insert("/item/:id", 1).unwrap();
    /// router.insert("/item/:id/", 2).unwrap();
    ///
    /// let matches = router.at("/item/7");
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(matches[0].handlers, [&1, &2]);
    ///
    /// let err = router.insert("/item/:id([0-9)", 3).unwrap_err();
    /// assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    /// assert_eq!(router.len(), 2);
    /// ```
    pub fn insert(&mut self, pattern: &str, handler: T) -> Result<(), ConfigurationError> {
        let key = normalize_for_storage(pattern, self.config.ignore_case, self.config.fixed_path);
        let steps = match Step::prepare(&key, self.config.ignore_case) {
            Ok(steps) => steps,
            Err(err) => {
                tracing::warn!(pattern, error = %err, "rejected route");
                return Err(err);
            }
        };

        let handlers = self.root.insert(steps, self.routes.len());
        tracing::debug!(pattern = %key, handlers, "registered route");

        self.routes.push(Route {
            pattern: key,
            handler,
        });
        Ok(())
    }

    /// Finds every route matching `path`.
    ///
    /// Results are in discovery order: at each segment, static children are
    /// visited before parameters, parameters before the catch-all, and the
    /// catch-all before the wildcard. An empty result is a routing miss.
    pub fn at(&self, path: &str) -> Vec<Match<'_, T>> {
        let folded = fold_case(path, self.config.ignore_case);

        for lookup in Lookup::ALL.iter().copied() {
            if !lookup.enabled(&self.config) {
                continue;
            }

            let (fixed_path, trailing_slash) = lookup.flags(&self.config);
            let segments = match_segments(&folded, fixed_path, trailing_slash);

            let mut found = Vec::new();
            self.root.search(&segments, Params::default(), &mut found);
            tracing::trace!(path, ?lookup, matches = found.len(), "route lookup");

            if !found.is_empty() {
                return found
                    .into_iter()
                    .map(|(params, routes)| Match {
                        params,
                        handlers: routes.iter().map(|&i| &self.routes[i].handler).collect(),
                    })
                    .collect();
            }
        }

        Vec::new()
    }

    /// Iterates over every registration as `(normalized pattern, handler)`,
    /// in registration order.
    /// ```rust
    /// # use segtrie::Router;
    /// let mut router = Router::new();
    /// router.insert("/API//Users/", "users").unwrap();
    ///
    /// let routes: Vec<_> = router.routes().collect();
    /// assert_eq!(routes, [("api/users", &"users")]);
    /// ```
    pub fn routes(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.routes
            .iter()
            .map(|route| (route.pattern.as_str(), &route.handler))
    }

    /// The number of registrations, counting repeated patterns.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
