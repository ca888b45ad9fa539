//! Process-wide localization configuration.
//!
//! # Responsibilities
//! - Turn caller options into a validated, immutable [`Config`]
//! - Normalize the scope declaration into the canonical flat list
//! - Apply option defaults (assign key, default locale)
//!
//! # Design Decisions
//! - Built exactly once at startup; there is no global registry
//! - Flat scopes are held behind `Arc` so resolved requests can share them

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::schema::LocalizationOptions;
use crate::config::validation::{validate_assign_schema, ConfigError};
use crate::scope::{FlatScope, NestedScope, ScopeId, ScopesDecl};

/// Key the resolved assigns are stored under when none is configured.
pub const DEFAULT_ASSIGN_KEY: &str = "locale";

/// Locale used when neither the options nor a scope name one.
pub const DEFAULT_LOCALE: &str = "en";

/// Assign consulted to find a scope's gettext locale.
pub const LOCALE_ASSIGN: &str = "locale";

/// Validated localization configuration.
#[derive(Debug, Clone)]
pub struct Config {
    declared: ScopesDecl,
    scopes: Vec<Arc<FlatScope>>,
    schema: BTreeSet<String>,
    assign_key: String,
    default_locale: String,
    gettext_backend: Option<String>,
    strict_assigns: bool,
}

impl Config {
    /// Validate `opts` and assemble the configuration.
    pub fn build(opts: LocalizationOptions) -> Result<Self, ConfigError> {
        let declared = opts.scopes.ok_or(ConfigError::MissingScopes)?;
        let flat = declared.flatten()?;
        if flat.is_empty() {
            return Err(ConfigError::EmptyScopes);
        }
        let schema = validate_assign_schema(&flat)?;

        let assign_key = opts
            .assign_key
            .unwrap_or_else(|| DEFAULT_ASSIGN_KEY.to_string());
        if assign_key.is_empty() {
            return Err(ConfigError::EmptyAssignKey);
        }
        let default_locale = opts
            .default_locale
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        tracing::info!(
            scopes = flat.len(),
            assign_key = %assign_key,
            default_locale = %default_locale,
            nested = matches!(declared, ScopesDecl::Nested(_)),
            "Localization config assembled"
        );

        Ok(Self {
            declared,
            scopes: flat.into_iter().map(Arc::new).collect(),
            schema,
            assign_key,
            default_locale,
            gettext_backend: opts.gettext_backend,
            strict_assigns: opts.strict_assigns,
        })
    }

    /// The canonical flat scope list.
    pub fn scopes(&self) -> &[Arc<FlatScope>] {
        &self.scopes
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Arc<FlatScope>> {
        self.scopes.get(id.0)
    }

    /// The declared tree, when scopes were declared nested.
    pub fn scopes_nested(&self) -> Option<&NestedScope> {
        match &self.declared {
            ScopesDecl::Nested(root) => Some(root),
            ScopesDecl::Flat(_) => None,
        }
    }

    pub fn declared(&self) -> &ScopesDecl {
        &self.declared
    }

    /// Assign keys shared by every scope.
    pub fn schema(&self) -> &BTreeSet<String> {
        &self.schema
    }

    pub fn assign_key(&self) -> &str {
        &self.assign_key
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn gettext_backend(&self) -> Option<&str> {
        self.gettext_backend.as_deref()
    }

    pub fn strict_assigns(&self) -> bool {
        self.strict_assigns
    }

    /// Find a scope by its slug chain.
    pub fn scope_id(&self, segments: &[&str]) -> Option<ScopeId> {
        self.scopes
            .iter()
            .position(|scope| scope.is_addressed_by(segments))
            .map(ScopeId)
    }

    /// Gettext locale of a scope: its `locale` assign, or the default locale.
    pub fn locale_of(&self, id: ScopeId) -> &str {
        self.scope(id)
            .and_then(|scope| scope.assigns.get(LOCALE_ASSIGN))
            .and_then(|value| value.as_str())
            .unwrap_or(self.default_locale.as_str())
    }
}
