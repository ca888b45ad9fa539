//! Scope resolution for a single request.
//!
//! # Responsibilities
//! - Recover the scope tag of the route the host router matched
//! - Seed request storage with the scope's assigns
//! - Detect tags that do not resolve to a configured scope
//!
//! # Design Decisions
//! - Idempotent: a second call returns the scope stored by the first
//! - Pass-through for untagged routes is `Ok(None)`, not an error

use std::sync::Arc;

use axum::http::Extensions;
use serde_json::Value;
use thiserror::Error;

use crate::localized::Localized;
use crate::resolve::assigns::Assigns;
use crate::scope::{FlatScope, ScopeId};

/// Scope selected for one request or connection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScope {
    pub id: ScopeId,
    pub scope: Arc<FlatScope>,
    /// Path the request or connection arrived on.
    pub raw_path: String,
}

/// Integrity failures between the expanded routes and the config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("route \"{route}\" is tagged with scope {scope}, which is not configured")]
    MissingRootSlug { route: String, scope: ScopeId },
}

/// Resolve the scope for `matched_pattern` and store it in `extensions`.
pub fn resolve_scope(
    localized: &Localized,
    matched_pattern: Option<&str>,
    raw_path: &str,
    extensions: &mut Extensions,
) -> Result<Option<ResolvedScope>, ResolveError> {
    if let Some(resolved) = extensions.get::<ResolvedScope>() {
        return Ok(Some(resolved.clone()));
    }

    let Some(entry) = matched_pattern.and_then(|pattern| localized.routes().by_pattern(pattern))
    else {
        return Ok(None);
    };
    let Some(id) = entry.scope else {
        return Ok(None);
    };

    let config = localized.config();
    let scope = config
        .scope(id)
        .cloned()
        .ok_or_else(|| ResolveError::MissingRootSlug {
            route: entry.path().to_string(),
            scope: id,
        })?;

    let resolved = ResolvedScope {
        id,
        scope,
        raw_path: raw_path.to_string(),
    };
    store(config.assign_key(), &resolved, extensions);
    Ok(Some(resolved))
}

pub(crate) fn store(assign_key: &str, resolved: &ResolvedScope, extensions: &mut Extensions) {
    let value = Value::Object(resolved.scope.assigns.clone());
    match extensions.get_mut::<Assigns>() {
        Some(assigns) => {
            assigns.insert(assign_key, value);
        }
        None => {
            let mut assigns = Assigns::default();
            assigns.insert(assign_key, value);
            extensions.insert(assigns);
        }
    }
    extensions.insert(resolved.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{Config, LocalizationOptions};
    use crate::fixtures;
    use crate::routing::{RouteEntry, RouteTable};

    fn localized(table: RouteTable) -> Localized {
        let config = Config::build(LocalizationOptions::new(fixtures::scopes_flat())).unwrap();
        Localized::new(config, table)
    }

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table.insert(RouteEntry::scoped("about", "/en/about", "/about", ScopeId(0)));
        table.insert(RouteEntry::scoped("about", "/fr/about", "/about", ScopeId(1)));
        table.insert(RouteEntry::unscoped("health", "/health"));
        table
    }

    #[test]
    fn test_sets_exact_scope_assigns() {
        let localized = localized(table());
        let mut extensions = Extensions::new();
        let resolved = resolve_scope(&localized, Some("/fr/about"), "/fr/about", &mut extensions)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.id, ScopeId(1));
        assert_eq!(resolved.raw_path, "/fr/about");

        let stored = localized.assigned_values(&extensions).unwrap();
        assert_eq!(stored, &localized.scopes()[1].assigns);
        assert_eq!(extensions.get::<ResolvedScope>(), Some(&resolved));
    }

    #[test]
    fn test_unscoped_route_passes_through() {
        let localized = localized(table());
        let mut extensions = Extensions::new();
        let resolved = resolve_scope(&localized, Some("/health"), "/health", &mut extensions).unwrap();
        assert!(resolved.is_none());
        assert!(extensions.get::<Assigns>().is_none());
        assert!(extensions.get::<ResolvedScope>().is_none());
    }

    #[test]
    fn test_no_match_passes_through() {
        let localized = localized(table());
        let mut extensions = Extensions::new();
        assert_eq!(resolve_scope(&localized, None, "/nope", &mut extensions), Ok(None));
        assert_eq!(
            resolve_scope(&localized, Some("/unknown"), "/unknown", &mut extensions),
            Ok(None)
        );
        assert!(extensions.get::<Assigns>().is_none());
    }

    #[test]
    fn test_idempotent() {
        let localized = localized(table());
        let mut extensions = Extensions::new();
        let first = resolve_scope(&localized, Some("/en/about"), "/en/about", &mut extensions).unwrap();
        // A second call, even with another pattern, returns the stored scope.
        let second = resolve_scope(&localized, Some("/fr/about"), "/fr/about", &mut extensions).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.unwrap().id, ScopeId(0));
    }

    #[test]
    fn test_dangling_tag_is_integrity_error() {
        let mut table = table();
        table.insert(RouteEntry::scoped("about", "/xx/about", "/about", ScopeId(42)));
        let localized = localized(table);
        let mut extensions = Extensions::new();
        let err = resolve_scope(&localized, Some("/xx/about"), "/xx/about", &mut extensions).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingRootSlug {
                route: "/xx/about".into(),
                scope: ScopeId(42),
            }
        );
        assert!(extensions.get::<Assigns>().is_none());
    }

    #[test]
    fn test_existing_assigns_preserved() {
        let localized = localized(table());
        let mut extensions = Extensions::new();
        let mut assigns = Assigns::default();
        assigns.insert("user", Value::from("alice"));
        extensions.insert(assigns);

        resolve_scope(&localized, Some("/en/about"), "/en/about", &mut extensions).unwrap();
        let assigns = extensions.get::<Assigns>().unwrap();
        assert!(assigns.contains("user"));
        assert!(assigns.contains("locale"));
    }
}
