//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use localized_routes::config::{AppConfig, Config, LocalizationOptions};
use localized_routes::fixtures;
use localized_routes::http::HttpServer;
use localized_routes::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// App config serving the sample region tree.
pub fn app_config() -> AppConfig {
    AppConfig {
        localization: LocalizationOptions::new(fixtures::scopes()),
        ..AppConfig::default()
    }
}

/// App config with French route segment translations enabled.
#[allow(dead_code)]
pub fn translated_app_config() -> AppConfig {
    let mut app = app_config();
    app.localization = app.localization.gettext_backend("routes");
    let fr = [("products", "produits"), ("about", "a-propos")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    app.translations.insert("fr".to_string(), fr);
    app
}

/// Bind `addr`, serve `app` in the background, and return the shutdown handle.
pub async fn start_server(addr: SocketAddr, app: AppConfig) -> Shutdown {
    let config = Config::build(app.localization.clone()).unwrap();
    let listener = TcpListener::bind(addr).await.unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(&app, config);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown
}

/// GET `url` and decode the JSON body.
#[allow(dead_code)]
pub async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    let body = response.json().await.unwrap();
    (status, body)
}
