use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AddonConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally reachable host, only used to print the install link
    #[serde(default)]
    pub public_host: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_host: None,
        }
    }
}

impl ServerConfig {
    /// `stremio://` link that installs the addon in a client
    pub fn install_link(&self) -> Option<String> {
        self.public_host
            .as_deref()
            .filter(|host| !host.is_empty())
            .map(|host| format!("stremio://{host}/manifest.json"))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7000
}

/// Response and routing options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// `max-age` of the `Cache-Control` header, in seconds
    #[serde(default)]
    pub cache_max_age: u64,
    /// Directories served as static files under their base name
    #[serde(default)]
    pub static_dirs: Vec<PathBuf>,
    /// Where `/` redirects when no landing page is registered
    #[serde(default = "default_landing_redirect")]
    pub landing_redirect: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cache_max_age: 0,
            static_dirs: Vec::new(),
            landing_redirect: default_landing_redirect(),
        }
    }
}

fn default_landing_redirect() -> String {
    "https://github.com/Stremio/stremio-addon-sdk".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// Map the configured level onto a `tracing` filter directive.
    ///
    /// Besides the `tracing` names this accepts `warning` and `critical`,
    /// which addon authors commonly carry over from other servers.
    pub fn filter_directive(&self) -> Option<&'static str> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some("trace"),
            "debug" => Some("debug"),
            "info" => Some("info"),
            "warn" | "warning" => Some("warn"),
            "error" | "critical" => Some("error"),
            "off" => Some("off"),
            _ => None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AddonConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.http.cache_max_age, 0);
        assert!(config.http.static_dirs.is_empty());
        assert_eq!(config.log.filter_directive(), Some("info"));
    }

    #[test]
    fn test_install_link() {
        let mut server = ServerConfig::default();
        assert_eq!(server.install_link(), None);

        server.public_host = Some(String::new());
        assert_eq!(server.install_link(), None);

        server.public_host = Some("addon.example.com".to_string());
        assert_eq!(
            server.install_link().as_deref(),
            Some("stremio://addon.example.com/manifest.json")
        );
    }

    #[test]
    fn test_log_level_aliases() {
        let level = |name: &str| LogConfig {
            level: name.to_string(),
        };

        assert_eq!(level("WARNING").filter_directive(), Some("warn"));
        assert_eq!(level("critical").filter_directive(), Some("error"));
        assert_eq!(level("verbose").filter_directive(), None);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: AddonConfig = toml::from_str(
            r#"
[server]
port = 8080
public_host = "addon.example.com"

[http]
cache_max_age = 3600
static_dirs = ["public"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.http.cache_max_age, 3600);
        assert_eq!(config.http.static_dirs, vec![PathBuf::from("public")]);
        assert_eq!(config.log.level, "info");
    }
}
