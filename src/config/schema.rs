//! Configuration schema definitions.
//!
//! This module defines the on-disk configuration structure. All types derive
//! Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scope::ScopesDecl;

/// Root of a configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Scope declaration and localization options.
    pub localization: LocalizationOptions,

    /// HTTP listener settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route segment translations: locale -> (segment -> translated segment).
    pub translations: HashMap<String, HashMap<String, String>>,
}

/// Options accepted by [`Config::build`](crate::config::Config::build).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LocalizationOptions {
    /// Nested tree (TOML table) or flat list (array of tables). Required.
    pub scopes: Option<ScopesDecl>,

    /// Request-storage key the resolved assigns are stored under.
    pub assign_key: Option<String>,

    /// Locale used when a scope carries no `locale` assign.
    pub default_locale: Option<String>,

    /// Name of the translation catalog used for route segments.
    pub gettext_backend: Option<String>,

    /// Verify handler-rendered assigns against the scope schema.
    pub strict_assigns: bool,
}

impl LocalizationOptions {
    pub fn new(scopes: impl Into<ScopesDecl>) -> Self {
        Self {
            scopes: Some(scopes.into()),
            ..Self::default()
        }
    }

    pub fn assign_key(mut self, key: impl Into<String>) -> Self {
        self.assign_key = Some(key.into());
        self
    }

    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    pub fn gettext_backend(mut self, backend: impl Into<String>) -> Self {
        self.gettext_backend = Some(backend.into());
        self
    }

    pub fn strict_assigns(mut self, strict: bool) -> Self {
        self.strict_assigns = strict;
        self
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:4000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:4000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
