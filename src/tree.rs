//! The segment trie behind [`Router`](crate::Router).
//!
//! Every node owns its children outright: static children by literal, an
//! ordered list of parameter children, at most one catch-all child and at
//! most one wildcard child. Nodes store indices into the router's route
//! list rather than the handlers themselves.
use crate::error::ConfigurationError;
use crate::params::Params;
use crate::segment::{classify, Segment};

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamKind {
    Named,
    Constrained,
    Suffixed,
    ConstrainedSuffixed,
}

#[derive(Debug)]
pub(crate) struct Constraint {
    source: String,
    regex: Regex,
}

impl Constraint {
    fn compile(name: &str, pattern: &str, ignore_case: bool) -> Result<Self, ConfigurationError> {
        RegexBuilder::new(&format!("^(?:{})$", pattern))
            .case_insensitive(ignore_case)
            .build()
            .map(|regex| Constraint {
                source: pattern.to_owned(),
                regex,
            })
            .map_err(|err| ConfigurationError::InvalidPattern {
                name: name.to_owned(),
                pattern: pattern.to_owned(),
                source: err,
            })
    }
}

/// Identity of a parameter child. Two children are the same child only if
/// every field agrees.
#[derive(Debug)]
pub(crate) struct ParamKey {
    kind: ParamKind,
    name: String,
    constraint: Option<Constraint>,
    suffix: Option<String>,
}

impl ParamKey {
    fn same(&self, other: &ParamKey) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.suffix == other.suffix
            && self.constraint.as_ref().map(|c| c.source.as_str())
                == other.constraint.as_ref().map(|c| c.source.as_str())
    }

    /// Returns the value this parameter binds for `segment`, if any.
    fn bind<'s>(&self, segment: &'s str) -> Option<&'s str> {
        let value = match &self.suffix {
            Some(suffix) => segment.strip_suffix(suffix.as_str())?,
            None => segment,
        };

        match &self.constraint {
            Some(constraint) if !constraint.regex.is_match(value) => None,
            _ => Some(value),
        }
    }
}

#[derive(Debug)]
struct ParamChild {
    key: ParamKey,
    node: Node,
}

#[derive(Debug)]
struct CatchAll {
    name: String,
    node: Node,
}

/// One classified pattern segment, with its constraint compiled, ready to be
/// inserted.
#[derive(Debug)]
pub(crate) enum Step {
    Static(String),
    Param(ParamKey),
    CatchAll(String),
    Wildcard,
}

impl Step {
    /// Prepares every segment of a storage-normalized pattern.
    ///
    /// The pattern is expected to be folded already; `ignore_case` only
    /// decides how constraints compile. Segments after a wildcard are
    /// discarded. Nothing is inserted here, so a failing constraint leaves
    /// the trie untouched.
    pub(crate) fn prepare(
        pattern: &str,
        ignore_case: bool,
    ) -> Result<Vec<Step>, ConfigurationError> {
        let mut steps = Vec::new();
        let mut segments = pattern.split('/').filter(|s| !s.is_empty());

        while let Some(segment) = segments.next() {
            let step = match classify(segment) {
                Segment::Static(value) => Step::Static(value.to_owned()),
                Segment::Named { name } => Step::Param(ParamKey {
                    kind: ParamKind::Named,
                    name: name.to_owned(),
                    constraint: None,
                    suffix: None,
                }),
                Segment::Constrained { name, pattern } => Step::Param(ParamKey {
                    kind: ParamKind::Constrained,
                    name: name.to_owned(),
                    constraint: Some(Constraint::compile(name, pattern, ignore_case)?),
                    suffix: None,
                }),
                Segment::Suffixed { name, suffix } => Step::Param(ParamKey {
                    kind: ParamKind::Suffixed,
                    name: name.to_owned(),
                    constraint: None,
                    suffix: Some(suffix.to_owned()),
                }),
                Segment::ConstrainedSuffixed {
                    name,
                    pattern,
                    suffix,
                } => Step::Param(ParamKey {
                    kind: ParamKind::ConstrainedSuffixed,
                    name: name.to_owned(),
                    constraint: Some(Constraint::compile(name, pattern, ignore_case)?),
                    suffix: Some(suffix.to_owned()),
                }),
                Segment::CatchAll { name } => Step::CatchAll(name.to_owned()),
                Segment::Wildcard => {
                    let discarded = segments.by_ref().count();
                    if discarded > 0 {
                        tracing::debug!(pattern, discarded, "segments after wildcard are ignored");
                    }
                    steps.push(Step::Wildcard);
                    break;
                }
            };
            steps.push(step);
        }

        Ok(steps)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Node {
    statics: HashMap<String, Node>,
    params: Vec<ParamChild>,
    catch_all: Option<Box<CatchAll>>,
    wildcard: Option<Box<Node>>,
    routes: Vec<usize>,
}

impl Node {
    /// Walks `steps` from this node, creating nodes as needed, and attaches
    /// `route` to the last one. Returns the number of routes now attached
    /// there.
    pub(crate) fn insert(&mut self, steps: Vec<Step>, route: usize) -> usize {
        let mut node = self;

        for step in steps {
            node = match step {
                Step::Static(value) => node.statics.entry(value).or_default(),
                Step::Param(key) => {
                    let i = match node.params.iter().position(|child| child.key.same(&key)) {
                        Some(i) => i,
                        None => {
                            node.params.push(ParamChild {
                                key,
                                node: Node::default(),
                            });
                            node.params.len() - 1
                        }
                    };
                    &mut node.params[i].node
                }
                Step::CatchAll(name) => {
                    let catch_all = node.catch_all.get_or_insert_with(|| {
                        Box::new(CatchAll {
                            name,
                            node: Node::default(),
                        })
                    });
                    &mut catch_all.node
                }
                Step::Wildcard => &mut **node.wildcard.get_or_insert_with(Box::default),
            };
        }

        node.routes.push(route);
        node.routes.len()
    }

    /// Collects every route reachable with `segments`, together with the
    /// parameters bound on the way there.
    ///
    /// All branches are explored. At each level static children come first,
    /// then parameter children in insertion order, then the catch-all, then
    /// the wildcard.
    pub(crate) fn search<'n>(
        &'n self,
        segments: &[&str],
        params: Params,
        found: &mut Vec<(Params, &'n [usize])>,
    ) {
        let (segment, rest) = match segments.split_first() {
            Some(split) => split,
            None => {
                if !self.routes.is_empty() {
                    found.push((params.clone(), self.routes.as_slice()));
                }
                // a catch-all may match zero segments
                if let Some(catch_all) = &self.catch_all {
                    if !catch_all.node.routes.is_empty() {
                        found.push((
                            params.with(&catch_all.name, ""),
                            catch_all.node.routes.as_slice(),
                        ));
                    }
                }
                return;
            }
        };

        if let Some(child) = self.statics.get(*segment) {
            child.search(rest, params.clone(), found);
        }

        for child in &self.params {
            if let Some(value) = child.key.bind(segment) {
                child
                    .node
                    .search(rest, params.with(&child.key.name, value), found);
            }
        }

        // the catch-all ends the branch, nothing below it is searched
        if let Some(catch_all) = &self.catch_all {
            if !catch_all.node.routes.is_empty() {
                found.push((
                    params.with(&catch_all.name, segments.join("/")),
                    catch_all.node.routes.as_slice(),
                ));
            }
        }

        if let Some(wildcard) = &self.wildcard {
            wildcard.search(&[], params, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(root: &mut Node, pattern: &str, route: usize) -> usize {
        let steps = Step::prepare(pattern, false).unwrap();
        root.insert(steps, route)
    }

    fn search(root: &Node, segments: &[&str]) -> Vec<(Params, Vec<usize>)> {
        let mut found = Vec::new();
        root.search(segments, Params::default(), &mut found);
        found
            .into_iter()
            .map(|(params, routes)| (params, routes.to_vec()))
            .collect()
    }

    #[test]
    fn identical_parameters_share_a_child() {
        let mut root = Node::default();
        insert(&mut root, "a/:id/x", 0);
        insert(&mut root, "a/:id/y", 1);
        insert(&mut root, r"a/:id(\d+)", 2);
        insert(&mut root, r"a/:id(\d+)", 3);
        insert(&mut root, r"a/:id(\w+)", 4);
        insert(&mut root, "a/:id+.txt", 5);
        insert(&mut root, "a/:key", 6);

        let a = &root.statics["a"];
        assert_eq!(a.params.len(), 5);
        assert_eq!(a.params[0].node.statics.len(), 2);
        assert_eq!(a.params[1].node.routes, [2, 3]);
    }

    #[test]
    fn first_catch_all_wins() {
        let mut root = Node::default();
        insert(&mut root, "files/:path*", 0);
        assert_eq!(insert(&mut root, "files/:other*", 1), 2);

        let catch_all = root.statics["files"].catch_all.as_ref().unwrap();
        assert_eq!(catch_all.name, "path");
        assert_eq!(catch_all.node.routes, [0, 1]);
    }

    #[test]
    fn wildcard_truncates_pattern() {
        let mut root = Node::default();
        insert(&mut root, "static/*/ignored/:x", 0);

        let wildcard = root.statics["static"].wildcard.as_ref().unwrap();
        assert_eq!(wildcard.routes, [0]);
        assert!(wildcard.statics.is_empty());
        assert!(wildcard.params.is_empty());
    }

    #[test]
    fn invalid_constraint_is_rejected_before_insertion() {
        let err = Step::prepare("a/:id([)", false).unwrap_err();
        match err {
            ConfigurationError::InvalidPattern { name, pattern, .. } => {
                assert_eq!(name, "id");
                assert_eq!(pattern, "[");
            }
        }
    }

    #[test]
    fn search_explores_every_branch() {
        let mut root = Node::default();
        insert(&mut root, "users/new", 0);
        insert(&mut root, "users/:id", 1);
        insert(&mut root, "users/:rest*", 2);
        insert(&mut root, "users/*", 3);

        let found = search(&root, &["users", "new"]);
        let routes: Vec<usize> = found.iter().flat_map(|(_, r)| r.clone()).collect();
        assert_eq!(routes, [0, 1, 2, 3]);
        assert!(found[0].0.is_empty());
        assert_eq!(found[1].0.get("id"), Some("new"));
        assert_eq!(found[2].0.get("rest"), Some("new"));
        assert!(found[3].0.is_empty());
    }

    #[test]
    fn catch_all_binds_remaining_segments() {
        let mut root = Node::default();
        insert(&mut root, "docs/:path*", 0);

        let found = search(&root, &["docs", "a", "b", "c"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.get("path"), Some("a/b/c"));

        let found = search(&root, &["docs"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.get("path"), Some(""));
    }

    #[test]
    fn catch_all_does_not_descend() {
        let mut root = Node::default();
        insert(&mut root, ":rest*/tail", 0);

        assert!(search(&root, &["x", "tail"]).is_empty());
        assert!(search(&root, &["x"]).is_empty());
    }

    #[test]
    fn wildcard_needs_at_least_one_segment() {
        let mut root = Node::default();
        insert(&mut root, "static/*", 0);

        assert_eq!(search(&root, &["static", "css", "site.css"]).len(), 1);
        assert_eq!(search(&root, &["static", ""]).len(), 1);
        assert!(search(&root, &["static"]).is_empty());
    }

    #[test]
    fn suffix_and_constraint_binding() {
        let mut root = Node::default();
        insert(&mut root, r"api/:id(\d+)+.json", 0);

        let found = search(&root, &["api", "42.json"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0.get("id"), Some("42"));

        assert!(search(&root, &["api", "abc.json"]).is_empty());
        assert!(search(&root, &["api", "42.xml"]).is_empty());
        assert!(search(&root, &["api", "42"]).is_empty());
    }
}
