//! Assign consistency checks.

use std::collections::BTreeSet;

use thiserror::Error;

/// Failures surfaced while mounting or rendering a scoped handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// No scope is resolved under the configured assign key.
    #[error("assign \"{assign_key}\" is not set; no scope was resolved")]
    MissingLocaleAssign {
        assign_key: String,
        path: Option<String>,
    },

    /// The rendered assign keys differ from the active scope's keys.
    #[error("rendered assigns do not match the scope schema (missing: {missing:?}, unexpected: {extra:?})")]
    AssignsMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// A previous failure already aborted this connection.
    #[error("session aborted after an earlier failure")]
    Failed,
}

/// Assign keys a handler exposed to rendering.
///
/// Handlers attach this to their response so the resolver middleware can
/// run the post-assign check in strict mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedAssigns(pub BTreeSet<String>);

impl<S: Into<String>> FromIterator<S> for RenderedAssigns {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Compare the declared schema with the keys a handler made visible.
pub fn verify_assigns<I, S>(schema: &BTreeSet<String>, visible: I) -> Result<(), LifecycleError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let visible: BTreeSet<String> = visible
        .into_iter()
        .map(|key| key.as_ref().to_string())
        .collect();

    if &visible == schema {
        return Ok(());
    }

    Err(LifecycleError::AssignsMismatch {
        missing: schema.difference(&visible).cloned().collect(),
        extra: visible.difference(schema).cloned().collect(),
    })
}
