//! localized-routes demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     config file / fixtures
//!            │
//!            ▼
//!     ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!     │    scope     │───▶│   config     │───▶│   routing    │
//!     │  normalize   │    │   Config     │    │   expand     │
//!     └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                    │
//!     Client Request                                 ▼
//!     ─────────────▶ http server ──▶ resolve (route_layer) ──▶ handler
//!                                         │
//!     Live socket                         ▼
//!     ─────────────▶ websocket ──▶ LiveSession (mount / verify)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use localized_routes::config::{load_config, AppConfig, Config, LocalizationOptions};
use localized_routes::fixtures;
use localized_routes::http::HttpServer;
use localized_routes::lifecycle::{signals::forward_signals, Shutdown};
use localized_routes::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "localized-routes")]
#[command(about = "Serve a site with one route copy per localized scope", long_about = None)]
struct Cli {
    /// TOML configuration file. Sample scopes are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print every registered route and its scope
    Routes,
    /// Print the flattened scope list
    Scopes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (app, config) = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let app = AppConfig {
                localization: LocalizationOptions::new(fixtures::scopes()),
                ..AppConfig::default()
            };
            let config = Config::build(app.localization.clone())?;
            (app, config)
        }
    };

    logging::init_logging(&app.observability.log_level);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(app, config).await,
        Commands::Routes => {
            let server = HttpServer::new(&app, config);
            let localized = server.localized();
            for entry in localized.routes().iter() {
                let scope = entry
                    .scope
                    .and_then(|id| localized.config().scope(id))
                    .map(|scope| scope.path())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<10} {:<32} {}", entry.name, entry.path(), scope);
            }
            Ok(())
        }
        Commands::Scopes => {
            for (id, scope) in config.scopes().iter().enumerate() {
                println!("#{:<3} {:<20} {}", id, scope.path(), serde_json::Value::Object(scope.assigns.clone()));
            }
            Ok(())
        }
    }
}

async fn serve(app: AppConfig, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("localized-routes v{} starting", env!("CARGO_PKG_VERSION"));

    if app.observability.metrics_enabled {
        match app.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %app.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&app.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    forward_signals(shutdown.clone());

    let server = HttpServer::new(&app, config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
