//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every scope carries the same assign keys
//! - Reject empty scope lists and empty assign keys
//!
//! # Design Decisions
//! - Validation is a pure function over the flattened scope list
//! - Runs once at build time, never per request

use std::collections::BTreeSet;

use thiserror::Error;

use crate::scope::{FlatScope, ScopeError};

/// Errors raised while assembling a [`Config`](crate::config::Config).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no scopes declared")]
    MissingScopes,

    #[error("scope declaration produced no scopes")]
    EmptyScopes,

    #[error("assign key must not be empty")]
    EmptyAssignKey,

    /// Some scope's assign keys differ from the others.
    #[error("scope \"{scope}\" has a different assign schema; keys not shared by all scopes: {keys:?}")]
    AssignsSchemaMismatch { scope: String, keys: Vec<String> },

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

/// Compute the shared assign key schema of a scope list.
///
/// Fails if the union of all key sets differs from their intersection.
pub fn validate_assign_schema(scopes: &[FlatScope]) -> Result<BTreeSet<String>, ConfigError> {
    let Some(first) = scopes.first() else {
        return Err(ConfigError::EmptyScopes);
    };

    let mut union = first.assign_keys();
    let mut intersection = union.clone();
    for scope in &scopes[1..] {
        let keys = scope.assign_keys();
        union.extend(keys.iter().cloned());
        intersection.retain(|key| keys.contains(key));
    }

    let drift: Vec<String> = union.difference(&intersection).cloned().collect();
    if drift.is_empty() {
        return Ok(intersection);
    }

    // Name the first scope that does not carry the full key set.
    let offender = scopes
        .iter()
        .find(|scope| scope.assign_keys() != union)
        .map(FlatScope::path)
        .unwrap_or_default();

    Err(ConfigError::AssignsSchemaMismatch {
        scope: display_path(&offender),
        keys: drift,
    })
}

pub(crate) fn display_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homogeneous_schema() {
        let scopes = vec![
            FlatScope::new(["en"]).assign("name", "English").assign("locale", "en"),
            FlatScope::new(["fr"]).assign("locale", "fr").assign("name", "Français"),
        ];
        let schema = validate_assign_schema(&scopes).unwrap();
        assert_eq!(schema.into_iter().collect::<Vec<_>>(), vec!["locale", "name"]);
    }

    #[test]
    fn test_missing_key_in_one_scope() {
        let scopes = vec![
            FlatScope::new(["en"]).assign("name", "English").assign("locale", "en"),
            FlatScope::new(["fr"]).assign("name", "Français"),
        ];
        let err = validate_assign_schema(&scopes).unwrap_err();
        assert_eq!(
            err,
            ConfigError::AssignsSchemaMismatch {
                scope: "/fr".into(),
                keys: vec!["locale".into()],
            }
        );
    }

    #[test]
    fn test_extra_key_in_one_scope() {
        let scopes = vec![
            FlatScope::new(["en"]).assign("name", "English"),
            FlatScope::new(["fr"]).assign("name", "Français").assign("flag", "fr"),
            FlatScope::new(["de"]).assign("name", "Deutsch"),
        ];
        let err = validate_assign_schema(&scopes).unwrap_err();
        assert!(err.to_string().contains("flag"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(validate_assign_schema(&[]), Err(ConfigError::EmptyScopes));
    }

    #[test]
    fn test_root_offender_display() {
        let scopes = vec![
            FlatScope::default(),
            FlatScope::new(["en"]).assign("name", "English"),
        ];
        match validate_assign_schema(&scopes) {
            Err(ConfigError::AssignsSchemaMismatch { scope, .. }) => assert_eq!(scope, "/"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
