//! Scope resolution middleware.
//!
//! Install with `route_layer` so axum has already matched the route and
//! stored its [`MatchedPath`] when this runs.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::live::{verify_assigns, RenderedAssigns};
use crate::localized::Localized;
use crate::observability::metrics;
use crate::resolve::resolver::resolve_scope;

pub async fn resolve_scope_middleware(
    State(localized): State<Localized>,
    mut req: Request,
    next: Next,
) -> Response {
    let matched = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());
    let raw_path = req.uri().path().to_owned();

    let resolved = match resolve_scope(&localized, matched.as_deref(), &raw_path, req.extensions_mut()) {
        Ok(Some(resolved)) => {
            tracing::debug!(path = %raw_path, scope = %resolved.id, "Scope resolved");
            metrics::record_resolution("resolved");
            Some(resolved)
        }
        Ok(None) => {
            tracing::trace!(path = %raw_path, "Unscoped route, passing through");
            metrics::record_resolution("passthrough");
            None
        }
        Err(e) => {
            tracing::error!(path = %raw_path, error = %e, "Scope resolution integrity failure");
            metrics::record_resolution("integrity_error");
            return e.into_response();
        }
    };

    let mut response = next.run(req).await;

    // Post-assign check: handlers attach the keys they rendered.
    let rendered = response.extensions_mut().remove::<RenderedAssigns>();
    if let (true, Some(resolved), Some(rendered)) =
        (localized.config().strict_assigns(), resolved, rendered)
    {
        if let Err(e) = verify_assigns(&resolved.scope.assign_keys(), &rendered.0) {
            tracing::error!(path = %raw_path, error = %e, "Rendered assigns drifted from scope schema");
            metrics::record_assigns_check("mismatch");
            return e.into_response();
        }
        metrics::record_assigns_check("verified");
    }

    response
}
