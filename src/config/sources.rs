use super::models::AddonConfig;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::{Path, PathBuf};

const CONFIG_ENV_VAR: &str = "STREMIO_ADDON_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/stremio-addon.toml";
const ENV_PREFIX: &str = "STREMIO_ADDON";
const ENV_SEPARATOR: &str = "__";
const STATIC_DIRS_KEY: &str = "http.static_dirs";

/// Read `.env`, then the configuration file named by `STREMIO_ADDON_CONFIG`
/// (or the default path), then `STREMIO_ADDON__*` variables.
pub fn load() -> Result<AddonConfig, ConfigError> {
    // Variables from .env end up in the process environment
    let _ = dotenvy::dotenv();

    load_from_sources(&config_path())
}

/// Same as [`load`] with an explicit file and without `.env`
pub fn load_from_sources(config_path: &Path) -> Result<AddonConfig, ConfigError> {
    build(config_path, environment())
}

fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// `STREMIO_ADDON__HTTP__CACHE_MAX_AGE=3600` sets `http.cache_max_age`.
/// Static directories are a comma separated list.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key(STATIC_DIRS_KEY)
}

fn build(config_path: &Path, environment: Environment) -> Result<AddonConfig, ConfigError> {
    if config_path.exists() {
        tracing::info!(path = %config_path.display(), "Loading configuration file");
    } else {
        tracing::debug!(path = %config_path.display(), "No configuration file, using defaults");
    }

    config::Config::builder()
        .add_source(File::from(config_path).required(false))
        .add_source(environment)
        .build()?
        .try_deserialize()
}
