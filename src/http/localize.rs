//! Axum integration for route localization.
//!
//! # Responsibilities
//! - Register one copy of a route block per scope with an axum `Router`
//! - Record every copy in the `RouteTable` with its scope tag
//! - Install the scope resolver on all registered routes
//!
//! # Design Decisions
//! - axum panics on duplicate patterns, so repeats are skipped with a warning
//! - The resolver runs as a `route_layer`, after axum has matched the route

use std::sync::Arc;

use axum::{middleware, routing::MethodRouter, Router};

use crate::config::Config;
use crate::localized::Localized;
use crate::resolve::resolve_scope_middleware;
use crate::routing::{expand, RouteBlock, RouteEntry, RouteTable, SegmentTranslator};
use crate::scope::{FlatScope, ScopeId};

/// Builder that expands localized route blocks into an axum router.
pub struct LocalizedRouter<S = Localized> {
    config: Config,
    translator: Option<Arc<dyn SegmentTranslator>>,
    table: RouteTable,
    routes: Vec<(String, MethodRouter<S>)>,
}

impl<S> LocalizedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(config: Config) -> Self {
        Self {
            config,
            translator: None,
            table: RouteTable::new(),
            routes: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate static route segments for each scope's locale.
    pub fn translator(mut self, translator: Arc<dyn SegmentTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Register `block` once per scope, prefixed with the scope path.
    pub fn localize<F>(mut self, block: F) -> Self
    where
        F: FnMut(ScopeId, &FlatScope) -> RouteBlock<MethodRouter<S>>,
    {
        let expanded = expand(&self.config, self.translator.as_deref(), block);
        for route in expanded {
            if self.table.by_pattern(&route.path).is_some() {
                tracing::warn!(path = %route.path, name = %route.name, "Skipping duplicate localized route");
                continue;
            }
            self.table.insert(RouteEntry::scoped(
                route.name,
                &route.path,
                route.template,
                route.scope,
            ));
            self.routes.push((route.path, route.handler));
        }
        self
    }

    /// Register a route outside every scope. Requests to it pass through.
    pub fn route(mut self, name: &str, path: &str, handler: MethodRouter<S>) -> Self {
        if self.table.by_pattern(path).is_some() {
            tracing::warn!(path = %path, name = %name, "Skipping duplicate route");
            return self;
        }
        self.table.insert(RouteEntry::unscoped(name, path));
        self.routes.push((path.to_string(), handler));
        self
    }

    /// Build the router and the shared context the resolver reads.
    pub fn finish(self) -> (Router<S>, Localized) {
        let localized = Localized::new(self.config, self.table);

        let has_routes = !self.routes.is_empty();
        let mut router = Router::new();
        for (path, handler) in self.routes {
            router = router.route(&path, handler);
        }
        // route_layer panics on a router without routes.
        if has_routes {
            router = router.route_layer(middleware::from_fn_with_state(
                localized.clone(),
                resolve_scope_middleware,
            ));
        }

        tracing::info!(
            routes = localized.routes().len(),
            scopes = localized.scopes().len(),
            "Localized router built"
        );
        (router, localized)
    }
}
