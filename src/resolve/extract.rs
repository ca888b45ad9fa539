//! Handler extractors for resolved scope data.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::live::LifecycleError;
use crate::localized::Localized;
use crate::resolve::resolver::ResolvedScope;
use crate::scope::AssignMap;

impl<S> FromRequestParts<S> for ResolvedScope
where
    Localized: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = LifecycleError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<ResolvedScope>() {
            Some(resolved) => Ok(resolved.clone()),
            None => Err(LifecycleError::MissingLocaleAssign {
                assign_key: Localized::from_ref(state).config().assign_key().to_string(),
                path: Some(parts.uri.path().to_string()),
            }),
        }
    }
}

/// The resolved scope's assigns, read from request storage.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedValues(pub AssignMap);

impl<S> FromRequestParts<S> for AssignedValues
where
    Localized: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = LifecycleError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let localized = Localized::from_ref(state);
        localized
            .assigned_values(&parts.extensions)
            .cloned()
            .map(AssignedValues)
            .map_err(|e| match e {
                LifecycleError::MissingLocaleAssign { assign_key, path: None } => {
                    LifecycleError::MissingLocaleAssign {
                        assign_key,
                        path: Some(parts.uri.path().to_string()),
                    }
                }
                other => other,
            })
    }
}
