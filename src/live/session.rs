//! Per-connection scope state.
//!
//! # Responsibilities
//! - Resolve the connection's scope from its initial URL (mount hook)
//! - Re-resolve on remount (live navigation)
//! - Verify render-visible assigns against the active scope
//! - Track `Unresolved → Resolved → Verified`, with `Failed` terminal

use std::mem;

use url::Url;

use crate::live::guard::{verify_assigns, LifecycleError};
use crate::localized::Localized;
use crate::observability::metrics;
use crate::resolve::{Assigns, ResolvedScope};
use crate::scope::AssignMap;

/// Where a connection is in its scope lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeState {
    Unresolved,
    Resolved(ResolvedScope),
    Verified(ResolvedScope),
    Failed,
}

/// Scope state and assigns owned by one persistent connection.
#[derive(Debug)]
pub struct LiveSession {
    localized: Localized,
    state: ScopeState,
    assigns: Assigns,
}

impl LiveSession {
    pub fn new(localized: Localized) -> Self {
        Self {
            localized,
            state: ScopeState::Unresolved,
            assigns: Assigns::default(),
        }
    }

    pub fn state(&self) -> &ScopeState {
        &self.state
    }

    pub fn resolved(&self) -> Option<&ResolvedScope> {
        match &self.state {
            ScopeState::Resolved(resolved) | ScopeState::Verified(resolved) => Some(resolved),
            ScopeState::Unresolved | ScopeState::Failed => None,
        }
    }

    /// Mount hook: resolve the scope from the connection's initial path or URL.
    pub fn mount(&mut self, initial: &str) -> Result<ResolvedScope, LifecycleError> {
        if self.state == ScopeState::Failed {
            return Err(LifecycleError::Failed);
        }

        let path = request_path(initial);
        let config = self.localized.config();
        let found = self
            .localized
            .routes()
            .match_path(&path)
            .and_then(|(entry, _)| entry.scope)
            .and_then(|id| config.scope(id).cloned().map(|scope| (id, scope)));

        let Some((id, scope)) = found else {
            tracing::warn!(path = %path, "Live mount without a matching scope");
            metrics::record_mount("missing_scope");
            self.state = ScopeState::Failed;
            return Err(LifecycleError::MissingLocaleAssign {
                assign_key: config.assign_key().to_string(),
                path: Some(path),
            });
        };

        let resolved = ResolvedScope {
            id,
            scope,
            raw_path: path,
        };
        self.assigns.insert(
            config.assign_key(),
            serde_json::Value::Object(resolved.scope.assigns.clone()),
        );
        tracing::debug!(path = %resolved.raw_path, scope = %resolved.id, "Live session mounted");
        metrics::record_mount("resolved");

        self.state = ScopeState::Resolved(resolved.clone());
        Ok(resolved)
    }

    /// Post-assign check for the keys a handler placed into render assigns.
    pub fn verify<I, S>(&mut self, visible: I) -> Result<(), LifecycleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = match mem::replace(&mut self.state, ScopeState::Failed) {
            ScopeState::Resolved(resolved) | ScopeState::Verified(resolved) => resolved,
            ScopeState::Failed => return Err(LifecycleError::Failed),
            ScopeState::Unresolved => {
                metrics::record_assigns_check("unresolved");
                return Err(LifecycleError::MissingLocaleAssign {
                    assign_key: self.localized.config().assign_key().to_string(),
                    path: None,
                });
            }
        };

        if let Err(err) = verify_assigns(&resolved.scope.assign_keys(), visible) {
            tracing::warn!(path = %resolved.raw_path, error = %err, "Live assigns mismatch");
            metrics::record_assigns_check("mismatch");
            return Err(err);
        }

        metrics::record_assigns_check("verified");
        self.state = ScopeState::Verified(resolved);
        Ok(())
    }

    /// Assigns resolved for this connection under the configured assign key.
    pub fn assigned_values(&self) -> Result<&AssignMap, LifecycleError> {
        let assign_key = self.localized.config().assign_key();
        self.assigns
            .get(assign_key)
            .and_then(|value| value.as_object())
            .ok_or_else(|| LifecycleError::MissingLocaleAssign {
                assign_key: assign_key.to_string(),
                path: self.resolved().map(|resolved| resolved.raw_path.clone()),
            })
    }
}

/// Path component of a mount URL; accepts absolute URLs and bare paths.
///
/// The path is kept byte for byte (encoding, trailing slash) so it matches
/// exactly what an HTTP request for the same URL would.
fn request_path(initial: &str) -> String {
    let path = match Url::parse(initial) {
        Ok(url) => url.path().to_string(),
        Err(_) => initial
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::{Config, LocalizationOptions};
    use crate::fixtures;
    use crate::routing::{expand, RouteBlock, RouteEntry, RouteTable};
    use crate::scope::ScopeId;

    fn localized() -> Localized {
        let config = Config::build(LocalizationOptions::new(fixtures::scopes_flat())).unwrap();
        let mut table = RouteTable::new();
        for route in expand(&config, None, |_, _| {
            RouteBlock::new().route("home", "/", ()).route("page", "/pages/{slug}", ())
        }) {
            table.insert(RouteEntry::scoped(route.name, &route.path, route.template, route.scope));
        }
        table.insert(RouteEntry::unscoped("health", "/health"));
        Localized::new(config, table)
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/fr/pages/a?x=1"), "/fr/pages/a");
        assert_eq!(request_path("/fr#top"), "/fr");
        assert_eq!(request_path("https://example.com/nl/pages/b?y=2"), "/nl/pages/b");
        assert_eq!(request_path("/fr/"), "/fr/");
        assert_eq!(request_path("?tab=1"), "/");
        assert_eq!(request_path("https://example.com"), "/");
    }

    #[test]
    fn test_mount_resolves_scope() {
        let mut session = LiveSession::new(localized());
        assert_eq!(session.state(), &ScopeState::Unresolved);

        let resolved = session.mount("http://localhost/fr/pages/intro").unwrap();
        assert_eq!(resolved.scope.path(), "/fr");
        assert_eq!(resolved.raw_path, "/fr/pages/intro");
        assert!(matches!(session.state(), ScopeState::Resolved(_)));
        assert_eq!(session.assigned_values().unwrap()["name"], json!("Français"));
    }

    #[test]
    fn test_mount_without_scope_fails() {
        let mut session = LiveSession::new(localized());
        let err = session.mount("/health").unwrap_err();
        assert_eq!(
            err,
            LifecycleError::MissingLocaleAssign {
                assign_key: "locale".into(),
                path: Some("/health".into()),
            }
        );
        assert_eq!(session.state(), &ScopeState::Failed);

        // Failed is terminal.
        assert_eq!(session.mount("/en"), Err(LifecycleError::Failed));
        assert_eq!(session.verify(["locale", "name"]), Err(LifecycleError::Failed));
    }

    #[test]
    fn test_mount_unknown_path_fails() {
        let mut session = LiveSession::new(localized());
        assert!(matches!(
            session.mount("/de/pages/x"),
            Err(LifecycleError::MissingLocaleAssign { .. })
        ));
    }

    #[test]
    fn test_verify_transitions() {
        let mut session = LiveSession::new(localized());
        session.mount("/nl").unwrap();
        session.verify(["name", "locale"]).unwrap();
        assert!(matches!(session.state(), ScopeState::Verified(_)));

        // Verification repeats on every render.
        session.verify(["locale", "name"]).unwrap();
        assert!(matches!(session.state(), ScopeState::Verified(_)));
    }

    #[test]
    fn test_verify_mismatch_fails_session() {
        let mut session = LiveSession::new(localized());
        session.mount("/en").unwrap();
        let err = session.verify(["locale"]).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::AssignsMismatch {
                missing: vec!["name".into()],
                extra: vec![],
            }
        );
        assert_eq!(session.state(), &ScopeState::Failed);
    }

    #[test]
    fn test_verify_before_mount() {
        let mut session = LiveSession::new(localized());
        assert!(matches!(
            session.verify(["locale", "name"]),
            Err(LifecycleError::MissingLocaleAssign { path: None, .. })
        ));
        assert_eq!(session.state(), &ScopeState::Failed);
        assert!(session.assigned_values().is_err());
        assert_eq!(session.mount("/en"), Err(LifecycleError::Failed));
    }

    #[test]
    fn test_mount_trailing_slash_fails() {
        let mut session = LiveSession::new(localized());
        assert!(matches!(
            session.mount("/fr/"),
            Err(LifecycleError::MissingLocaleAssign { .. })
        ));
    }

    #[test]
    fn test_mount_prefers_static_route() {
        let config = Config::build(LocalizationOptions::new(fixtures::scopes())).unwrap();
        let mut table = RouteTable::new();
        for route in expand(&config, None, |_, _| {
            RouteBlock::new().route("home", "/", ()).route("page", "/{page}", ())
        }) {
            table.insert(RouteEntry::scoped(route.name, &route.path, route.template, route.scope));
        }
        let gb = config.scope_id(&["gb"]).unwrap();
        let mut session = LiveSession::new(Localized::new(config, table));

        // The root scope's "/{page}" is declared first, but "/gb" is static.
        let resolved = session.mount("/gb").unwrap();
        assert_eq!(resolved.id, gb);
        assert_eq!(session.mount("/contact").unwrap().id, ScopeId(0));
    }

    #[test]
    fn test_remount_switches_scope() {
        let mut session = LiveSession::new(localized());
        session.mount("/en").unwrap();
        session.verify(["locale", "name"]).unwrap();
        let resolved = session.mount("/nl/pages/over").unwrap();
        assert_eq!(resolved.scope.path(), "/nl");
        assert!(matches!(session.state(), ScopeState::Resolved(_)));
        assert_eq!(session.assigned_values().unwrap()["locale"], json!("nl"));
    }
}
