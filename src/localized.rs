//! Shared localization context.
//!
//! `Localized` bundles the immutable [`Config`] with the [`RouteTable`] the
//! expansion produced. It is cheap to clone and is handed to the resolver
//! middleware, the extractors, live sessions and application handlers.

use std::sync::Arc;

use axum::http::Extensions;
use url::Url;

use crate::config::Config;
use crate::live::LifecycleError;
use crate::resolve::{Assigns, ResolvedScope};
use crate::routing::{RouteError, RouteTable};
use crate::scope::{AssignMap, FlatScope, NestedScope, ScopeId};

#[derive(Debug, Clone)]
pub struct Localized {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: Config,
    routes: RouteTable,
}

impl Localized {
    pub fn new(config: Config, routes: RouteTable) -> Self {
        Self {
            inner: Arc::new(Inner { config, routes }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    /// The canonical flat scope list.
    pub fn scopes(&self) -> &[Arc<FlatScope>] {
        self.inner.config.scopes()
    }

    /// The declared scope tree, if scopes were declared nested.
    pub fn scopes_nested(&self) -> Option<&NestedScope> {
        self.inner.config.scopes_nested()
    }

    /// Scope resolved for the current request, if any.
    pub fn get_scope<'a>(&self, extensions: &'a Extensions) -> Option<&'a ResolvedScope> {
        extensions.get::<ResolvedScope>()
    }

    /// Assigns stored for the current request under the configured assign key.
    pub fn assigned_values<'a>(
        &self,
        extensions: &'a Extensions,
    ) -> Result<&'a AssignMap, LifecycleError> {
        let assign_key = self.inner.config.assign_key();
        extensions
            .get::<Assigns>()
            .and_then(|assigns| assigns.get(assign_key))
            .and_then(|value| value.as_object())
            .ok_or_else(|| LifecycleError::MissingLocaleAssign {
                assign_key: assign_key.to_string(),
                path: extensions
                    .get::<ResolvedScope>()
                    .map(|resolved| resolved.raw_path.clone()),
            })
    }

    /// Path of route `name` inside `scope`, with `params` filled in.
    pub fn loc_route(
        &self,
        scope: ScopeId,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<String, RouteError> {
        if self.inner.config.scope(scope).is_none() {
            return Err(RouteError::UnknownScope(scope));
        }
        let entry = self
            .inner
            .routes
            .by_name(name, Some(scope))
            .ok_or_else(|| RouteError::UnknownRoute {
                name: name.to_string(),
                scope,
            })?;
        entry.pattern.render(params)
    }

    /// Absolute URL of route `name` inside `scope`, relative to `base`.
    pub fn loc_url(
        &self,
        base: &Url,
        scope: ScopeId,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, RouteError> {
        let path = self.loc_route(scope, name, params)?;
        Ok(base.join(&path)?)
    }

    /// Path of route `name` in every scope that declares it, in scope order.
    ///
    /// Scopes where a required parameter is missing are skipped.
    pub fn alternates(&self, name: &str, params: &[(&str, &str)]) -> Vec<(ScopeId, String)> {
        self.inner
            .routes
            .named(name)
            .filter_map(|entry| {
                let scope = entry.scope?;
                entry.pattern.render(params).ok().map(|path| (scope, path))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::LocalizationOptions;
    use crate::fixtures;
    use crate::routing::{expand, RouteBlock, RouteEntry};

    fn localized() -> Localized {
        let config = Config::build(LocalizationOptions::new(fixtures::scopes())).unwrap();
        let mut table = RouteTable::new();
        for route in expand(&config, None, |_, _| {
            RouteBlock::new()
                .route("home", "/", ())
                .route("product", "/products/{id}", ())
        }) {
            table.insert(RouteEntry::scoped(route.name, &route.path, route.template, route.scope));
        }
        table.insert(RouteEntry::unscoped("health", "/health"));
        Localized::new(config, table)
    }

    #[test]
    fn test_loc_route() {
        let localized = localized();
        let gb = localized.config().scope_id(&["gb"]).unwrap();
        assert_eq!(localized.loc_route(gb, "home", &[]).unwrap(), "/gb");
        assert_eq!(
            localized.loc_route(gb, "product", &[("id", "3")]).unwrap(),
            "/gb/products/3"
        );
        assert_eq!(
            localized.loc_route(gb, "product", &[("id", "a b?c")]).unwrap(),
            "/gb/products/a%20b%3Fc"
        );
        assert_eq!(
            localized.loc_route(gb, "product", &[]),
            Err(RouteError::MissingParam { name: "id".into() })
        );
        assert!(matches!(
            localized.loc_route(gb, "checkout", &[]),
            Err(RouteError::UnknownRoute { .. })
        ));
        assert_eq!(
            localized.loc_route(ScopeId(99), "home", &[]),
            Err(RouteError::UnknownScope(ScopeId(99)))
        );
    }

    #[test]
    fn test_loc_url() {
        let localized = localized();
        let fr = localized.config().scope_id(&["ca", "fr"]).unwrap();
        let base = Url::parse("https://shop.example.com/").unwrap();
        let url = localized.loc_url(&base, fr, "product", &[("id", "9")]).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/ca/fr/products/9");
    }

    #[test]
    fn test_alternates() {
        let localized = localized();
        let links = localized.alternates("home", &[]);
        assert_eq!(links.len(), localized.scopes().len());
        assert_eq!(links[0], (ScopeId(0), "/".to_string()));
        assert_eq!(links[2], (ScopeId(2), "/europe/nl".to_string()));
        assert!(localized.alternates("product", &[]).is_empty());
        assert!(localized.alternates("health", &[]).is_empty());
    }

    #[test]
    fn test_assigned_values_missing() {
        let localized = localized();
        let extensions = Extensions::new();
        assert!(localized.get_scope(&extensions).is_none());
        let err = localized.assigned_values(&extensions).unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::MissingLocaleAssign { ref assign_key, path: None } if assign_key == "locale"
        ));
    }

    #[test]
    fn test_assigned_values_present() {
        let localized = localized();
        let mut extensions = Extensions::new();
        let mut assigns = Assigns::default();
        assigns.insert("locale", json!({ "name": "Europe" }));
        extensions.insert(assigns);
        let values = localized.assigned_values(&extensions).unwrap();
        assert_eq!(values["name"], json!("Europe"));
    }

    #[test]
    fn test_scopes_accessors() {
        let localized = localized();
        assert_eq!(localized.scopes().len(), 7);
        assert_eq!(localized.scopes_nested(), Some(&fixtures::scopes()));
    }
}
