//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::assembler::Config;
use crate::config::schema::AppConfig;
use crate::config::validation::ConfigError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Config(#[from] ConfigError),
}

/// Load a TOML configuration file and assemble its localization config.
pub fn load_config(path: &Path) -> Result<(AppConfig, Config), LoadError> {
    let content = fs::read_to_string(path)?;
    let loaded = parse_config(&content)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(loaded)
}

/// Parse TOML text and assemble its localization config.
pub fn parse_config(content: &str) -> Result<(AppConfig, Config), LoadError> {
    let app: AppConfig = toml::from_str(content)?;
    let config = Config::build(app.localization.clone())?;
    Ok((app, config))
}
