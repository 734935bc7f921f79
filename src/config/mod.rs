//! Configuration management for addon servers
//!
//! Settings are layered:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use stremio_addon::config::AddonConfig;
//!
//! let config = AddonConfig::load().expect("Failed to load configuration");
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `STREMIO_ADDON__<section>__<key>`:
//! - `STREMIO_ADDON__SERVER__PORT=8080`
//! - `STREMIO_ADDON__SERVER__PUBLIC_HOST=addon.example.com`
//! - `STREMIO_ADDON__HTTP__CACHE_MAX_AGE=3600`
//! - `STREMIO_ADDON__HTTP__STATIC_DIRS=public,assets` (comma separated)
//!
//! # Configuration File
//!
//! The file is read from `config/stremio-addon.toml` unless
//! `STREMIO_ADDON_CONFIG` points elsewhere. A missing file is not an error.

mod models;
mod sources;
mod validation;

pub use models::{AddonConfig, HttpConfig, LogConfig, ServerConfig};
pub use validation::ValidationError;

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl AddonConfig {
    /// Load configuration from all sources (file + environment)
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the type system cannot (log level, static directories...)
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[server]\nport = 7001\n").unwrap();

        let config = AddonConfig::load_from_path(config_path).unwrap();
        assert_eq!(config.server.port, 7001);
    }

    #[test]
    fn test_validation_runs_after_loading() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[log]
level = "chatty"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = AddonConfig::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_static_dirs_resolved_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let assets = temp_dir.path().join("assets");
        fs::create_dir(&assets).unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = format!(
            "[http]\nstatic_dirs = [{:?}]\ncache_max_age = 60\n",
            assets.display().to_string()
        );
        fs::write(&config_path, toml_content).unwrap();

        let config = AddonConfig::load_from_path(config_path).unwrap();
        assert_eq!(config.http.static_dirs, vec![assets]);
        assert_eq!(config.http.cache_max_age, 60);
    }
}
