//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the localized demo site (home, about, product pages)
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, Config};
use crate::http::localize::LocalizedRouter;
use crate::http::request::{make_span, UuidRequestId};
use crate::http::response::Rendered;
use crate::http::websocket::live_socket;
use crate::lifecycle::shutdown;
use crate::localized::Localized;
use crate::resolve::{AssignedValues, ResolvedScope};
use crate::routing::{CatalogTranslator, RouteBlock};
use crate::scope::AssignMap;

/// HTTP server for the localized site.
pub struct HttpServer {
    router: Router,
    localized: Localized,
}

impl HttpServer {
    pub fn new(app: &AppConfig, config: Config) -> Self {
        let mut builder = LocalizedRouter::<Localized>::new(config);
        if let Some(domain) = builder.config().gettext_backend().map(str::to_string) {
            if !app.translations.is_empty() {
                let catalog = CatalogTranslator::new(domain, app.translations.clone());
                builder = builder.translator(Arc::new(catalog));
            }
        }

        let (router, localized) = builder
            .localize(|_, _| {
                RouteBlock::new()
                    .route("home", "/", get(home))
                    .route("about", "/about", get(about))
                    .route("product", "/products/{id}", get(product))
            })
            .route("health", "/health", get(health))
            .route("live", "/live/websocket", get(live_socket))
            .finish();

        let router = Self::build_router(app, router.with_state(localized.clone()));
        Self { router, localized }
    }

    /// Wrap the app with request ID, tracing and timeout layers.
    fn build_router(app: &AppConfig, router: Router) -> Router {
        router.layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(app.server.request_timeout_secs),
                ))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
    }

    pub fn localized(&self) -> &Localized {
        &self.localized
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn home(
    State(localized): State<Localized>,
    scope: ResolvedScope,
    AssignedValues(assigns): AssignedValues,
) -> Rendered {
    page(&localized, "home", &[], &scope, assigns)
}

async fn about(
    State(localized): State<Localized>,
    scope: ResolvedScope,
    AssignedValues(assigns): AssignedValues,
) -> Rendered {
    page(&localized, "about", &[], &scope, assigns)
}

async fn product(
    State(localized): State<Localized>,
    Path(id): Path<String>,
    scope: ResolvedScope,
    AssignedValues(assigns): AssignedValues,
) -> Rendered {
    page(&localized, "product", &[("id", id.as_str())], &scope, assigns)
}

async fn health() -> &'static str {
    "ok"
}

/// JSON page with the scope's assigns and links to the same page in every scope.
fn page(
    localized: &Localized,
    name: &str,
    params: &[(&str, &str)],
    scope: &ResolvedScope,
    assigns: AssignMap,
) -> Rendered {
    let alternates: Vec<Value> = localized
        .alternates(name, params)
        .into_iter()
        .filter_map(|(id, href)| {
            let target = localized.config().scope(id)?;
            Some(json!({
                "scope": target.path(),
                "name": target.assigns.get("name").cloned().unwrap_or(Value::Null),
                "href": href,
                "current": id == scope.id,
            }))
        })
        .collect();

    let body = json!({
        "page": name,
        "scope": scope.scope.path(),
        "path": scope.raw_path,
        "assigns": assigns,
        "alternates": alternates,
    });
    Rendered::new(body, &assigns)
}
