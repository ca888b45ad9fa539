//! Route localization.
//!
//! # Responsibilities
//! - Call the caller's route-block builder once per scope, in scope order
//! - Prefix every route path with the scope path
//! - Tag every produced route with its scope
//!
//! # Design Decisions
//! - Builder closure instead of code generation: the block is data
//! - Generic over the handler type so the algorithm is framework-free
//! - Infallible: all failure modes are caught when the Config is built

use crate::config::Config;
use crate::routing::translate::{translate_path, SegmentTranslator};
use crate::scope::{FlatScope, ScopeId};

/// A route as declared inside a localized block.
#[derive(Debug, Clone)]
pub struct RouteDecl<H> {
    pub name: String,
    pub path: String,
    pub handler: H,
}

/// The set of routes to replicate under every scope.
#[derive(Debug, Clone)]
pub struct RouteBlock<H> {
    routes: Vec<RouteDecl<H>>,
}

impl<H> Default for RouteBlock<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteBlock<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named route. `path` is relative to the scope prefix.
    pub fn route(mut self, name: impl Into<String>, path: impl Into<String>, handler: H) -> Self {
        self.routes.push(RouteDecl {
            name: name.into(),
            path: path.into(),
            handler,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDecl<H>> {
        self.routes.iter()
    }
}

/// One scoped copy of a declared route.
#[derive(Debug, Clone)]
pub struct ExpandedRoute<H> {
    pub name: String,
    /// Full path including the scope prefix.
    pub path: String,
    /// Path as declared in the block.
    pub template: String,
    pub scope: ScopeId,
    pub handler: H,
}

/// Expand `block` once per configured scope.
pub fn expand<H, F>(
    config: &Config,
    translator: Option<&dyn SegmentTranslator>,
    mut block: F,
) -> Vec<ExpandedRoute<H>>
where
    F: FnMut(ScopeId, &FlatScope) -> RouteBlock<H>,
{
    let mut expanded = Vec::new();

    for (index, scope) in config.scopes().iter().enumerate() {
        let id = ScopeId(index);
        let prefix = scope.path();
        let locale = config.locale_of(id);

        for decl in block(id, scope).routes {
            let local = match translator {
                Some(translator) => translate_path(translator, locale, &decl.path),
                None => decl.path.clone(),
            };
            expanded.push(ExpandedRoute {
                name: decl.name,
                path: join_path(&prefix, &local),
                template: decl.path,
                scope: id,
                handler: decl.handler,
            });
        }
    }

    tracing::debug!(
        scopes = config.scopes().len(),
        routes = expanded.len(),
        "Expanded localized routes"
    );
    expanded
}

/// Join a scope prefix and a route path without doubled or dangling slashes.
pub fn join_path(prefix: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    match (prefix.is_empty(), path.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", path),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{}/{}", prefix, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::config::LocalizationOptions;
    use crate::fixtures;
    use crate::routing::translate::CatalogTranslator;

    fn config() -> Config {
        Config::build(LocalizationOptions::new(fixtures::scopes())).unwrap()
    }

    fn block(_: ScopeId, _: &FlatScope) -> RouteBlock<&'static str> {
        RouteBlock::new()
            .route("home", "/", "home")
            .route("product", "/products/{id}", "product")
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "/"), "/");
        assert_eq!(join_path("", "/about"), "/about");
        assert_eq!(join_path("/en", "/"), "/en");
        assert_eq!(join_path("/en", "/about"), "/en/about");
        assert_eq!(join_path("/en/us", "about"), "/en/us/about");
    }

    #[test]
    fn test_one_copy_per_scope_in_order() {
        let config = config();
        let routes = expand(&config, None, block);
        assert_eq!(routes.len(), config.scopes().len() * 2);

        let homes: Vec<_> = routes
            .iter()
            .filter(|r| r.name == "home")
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(
            homes,
            vec!["/", "/europe", "/europe/nl", "/europe/be", "/gb", "/ca", "/ca/fr"]
        );

        for (index, pair) in routes.chunks(2).enumerate() {
            assert!(pair.iter().all(|r| r.scope == ScopeId(index)));
        }
    }

    #[test]
    fn test_prefix_and_template() {
        let config = config();
        let routes = expand(&config, None, block);
        let nl_product = routes
            .iter()
            .find(|r| r.name == "product" && r.scope == ScopeId(2))
            .unwrap();
        assert_eq!(nl_product.path, "/europe/nl/products/{id}");
        assert_eq!(nl_product.template, "/products/{id}");
        assert_eq!(nl_product.handler, "product");
    }

    #[test]
    fn test_block_sees_scope() {
        let config = config();
        let mut seen = Vec::new();
        let routes: Vec<ExpandedRoute<()>> = expand(&config, None, |id, scope| {
            seen.push((id, scope.path()));
            if scope.is_root() {
                RouteBlock::new()
            } else {
                RouteBlock::new().route("home", "/", ())
            }
        });
        assert_eq!(seen.len(), 7);
        assert_eq!(seen[0], (ScopeId(0), String::new()));
        assert_eq!(routes.len(), 6);
    }

    #[test]
    fn test_translated_segments() {
        let config = config();
        let mut nl = HashMap::new();
        nl.insert("products".to_string(), "producten".to_string());
        let mut catalog = HashMap::new();
        catalog.insert("nl".to_string(), nl);
        let translator = CatalogTranslator::new("routes", catalog);

        let routes = expand(&config, Some(&translator), block);
        let paths: Vec<_> = routes
            .iter()
            .filter(|r| r.name == "product")
            .map(|r| r.path.as_str())
            .collect();
        assert!(paths.contains(&"/europe/nl/producten/{id}"));
        assert!(paths.contains(&"/europe/be/producten/{id}"));
        assert!(paths.contains(&"/gb/products/{id}"));
    }
}
