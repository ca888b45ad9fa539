//! Route lookup and reverse routing.
//!
//! # Responsibilities
//! - Store expanded routes together with their scope tag
//! - Look up the entry for a pattern the host router matched
//! - Match raw paths for connections that bypass the host router
//! - Build concrete paths from (route name, scope)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup by pattern and by (name, scope) via HashMap
//! - Raw paths go through `matchit`, the router axum itself matches with,
//!   so connections outside axum pick the same route a request would:
//!   static segments beat parameters, trailing slashes are significant
//! - Explicit no-match rather than silent default

use std::collections::HashMap;

use thiserror::Error;

use crate::routing::matcher::{PathParams, PathPattern};
use crate::scope::ScopeId;

/// Position of a route in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteId(pub usize);

/// Reverse-routing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route named \"{name}\" in scope {scope}")]
    UnknownRoute { name: String, scope: ScopeId },

    #[error("unknown scope {0}")]
    UnknownScope(ScopeId),

    #[error("missing value for path parameter \"{name}\"")]
    MissingParam { name: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One concrete route.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Route name shared by all scoped copies (e.g. "product").
    pub name: String,

    /// Pattern as registered with the host router.
    pub pattern: PathPattern,

    /// The unprefixed pattern from the route block.
    pub template: String,

    /// Owning scope; `None` for routes outside any scope.
    pub scope: Option<ScopeId>,
}

impl RouteEntry {
    pub fn scoped(name: impl Into<String>, path: &str, template: impl Into<String>, scope: ScopeId) -> Self {
        Self {
            name: name.into(),
            pattern: PathPattern::parse(path),
            template: template.into(),
            scope: Some(scope),
        }
    }

    pub fn unscoped(name: impl Into<String>, path: &str) -> Self {
        Self {
            name: name.into(),
            pattern: PathPattern::parse(path),
            template: path.to_string(),
            scope: None,
        }
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Table of every registered route, in declaration order.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_pattern: HashMap<String, RouteId>,
    by_name: HashMap<(String, Option<ScopeId>), RouteId>,
    paths: matchit::Router<RouteId>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_pattern: HashMap::new(),
            by_name: HashMap::new(),
            paths: matchit::Router::new(),
        }
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. The first registration of a pattern or name wins.
    pub fn insert(&mut self, entry: RouteEntry) -> RouteId {
        let id = RouteId(self.entries.len());

        if self.by_pattern.contains_key(entry.path()) {
            tracing::warn!(path = %entry.path(), name = %entry.name, "Duplicate route pattern, keeping first");
        } else {
            self.by_pattern.insert(entry.path().to_string(), id);
            if let Err(e) = self.paths.insert(entry.path(), id) {
                tracing::warn!(path = %entry.path(), error = %e, "Route pattern conflicts with an earlier one");
            }
        }
        self.by_name
            .entry((entry.name.clone(), entry.scope))
            .or_insert(id);

        self.entries.push(entry);
        id
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteEntry> {
        self.entries.get(id.0)
    }

    /// Entry registered under exactly this pattern.
    pub fn by_pattern(&self, pattern: &str) -> Option<&RouteEntry> {
        self.by_pattern.get(pattern).and_then(|id| self.get(*id))
    }

    /// Entry for a route name within a scope (`None` = unscoped).
    pub fn by_name(&self, name: &str, scope: Option<ScopeId>) -> Option<&RouteEntry> {
        self.by_name
            .get(&(name.to_string(), scope))
            .and_then(|id| self.get(*id))
    }

    /// Entry axum would route `path` to, with its captured parameters.
    pub fn match_path(&self, path: &str) -> Option<(&RouteEntry, PathParams)> {
        let matched = self.paths.at(path).ok()?;
        let entry = self.get(*matched.value)?;
        let params = matched
            .params
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Some((entry, params))
    }

    /// All copies of a named route, in scope order.
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RouteEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.name == name && entry.scope.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
