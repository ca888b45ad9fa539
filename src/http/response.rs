//! Response rendering and error mapping.
//!
//! # Responsibilities
//! - Render scoped pages as JSON, attaching the rendered assign keys
//! - Map resolution and lifecycle failures to HTTP status codes
//!
//! # Design Decisions
//! - Integrity and lifecycle failures are server errors (500): they signal
//!   misconfiguration, not bad client input
//! - Error bodies are JSON `{"error": ...}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::live::{LifecycleError, RenderedAssigns};
use crate::resolve::ResolveError;
use crate::scope::AssignMap;

/// A page body plus the assigns it exposed to rendering.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub body: Value,
    pub assigns: RenderedAssigns,
}

impl Rendered {
    /// Render `body`, recording the keys of `assigns` as render-visible.
    pub fn new(body: Value, assigns: &AssignMap) -> Self {
        Self {
            body,
            assigns: assigns.keys().collect(),
        }
    }
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        let mut response = Json(self.body).into_response();
        response.extensions_mut().insert(self.assigns);
        response
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}

impl IntoResponse for LifecycleError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}
