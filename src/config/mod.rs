//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → schema.rs (AppConfig: localization, server, observability, translations)
//!     → assembler.rs (normalize scopes, apply defaults)
//!     → validation.rs (assign schema checks)
//!     → Config (validated, immutable)
//!     → moved into the Localized context, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup and never mutated
//! - All file sections have defaults to allow minimal configs
//! - Any configuration error is fatal; nothing is checked per request

pub mod assembler;
pub mod loader;
pub mod schema;
pub mod validation;

pub use assembler::{Config, DEFAULT_ASSIGN_KEY, DEFAULT_LOCALE};
pub use loader::{load_config, parse_config, LoadError};
pub use schema::{AppConfig, LocalizationOptions, ObservabilityConfig, ServerConfig};
pub use validation::ConfigError;
