//! Configuration loading and typed config structures for the service.
//!
//! Configuration lives in an optional `waste-config.yaml`. Every field has
//! a default, so a missing file or a partial file is fine. A handful of
//! environment variables override the file for container deployments.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use waste_api::ServerConfig;
use waste_db::PostgresConfig;

/// Environment variable overriding `database.url`.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable overriding `server.host`.
pub const ENV_HOST: &str = "WASTE_HOST";

/// Environment variable overriding `server.port`.
pub const ENV_PORT: &str = "WASTE_PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value for {name}: {message}")]
    InvalidEnv {
        /// Name of the environment variable.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration, mirroring `waste-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Record store connection settings.
    #[serde(default)]
    pub database: DatabaseSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ServiceConfig {
    /// Load configuration from a YAML file, then apply environment
    /// overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for when no file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override fields from variables returned by `lookup`.
    ///
    /// - `DATABASE_URL` overrides `database.url`
    /// - `WASTE_HOST` overrides `server.host`
    /// - `WASTE_PORT` overrides `server.port`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidEnv {
                name: ENV_PORT,
                message: format!("`{port}` is not a port number: {e}"),
            })?;
        }
        Ok(())
    }

    /// Listener settings for the HTTP layer.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.host.clone(),
            port: self.server.port,
        }
    }

    /// Pool settings for the data layer.
    pub fn store_config(&self) -> PostgresConfig {
        PostgresConfig::new(&self.database.url)
            .with_max_connections(self.database.max_connections)
            .with_connect_timeout(Duration::from_millis(self.database.connect_timeout_ms))
            .with_idle_timeout(Duration::from_millis(self.database.idle_timeout_ms))
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest `limit` accepted by the listing endpoint.
    #[serde(default = "default_max_list_limit")]
    pub max_list_limit: u32,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_list_limit: default_max_list_limit(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSection {
    /// `PostgreSQL` URL, or `memory://` for the in-memory store.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// How long an idle connection is kept.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout_ms: default_connect_timeout_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_list_limit() -> u32 {
    waste_api::state::DEFAULT_MAX_LIST_LIMIT
}

fn default_database_url() -> String {
    String::from("postgresql://127.0.0.1:5432/waste")
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_idle_timeout_ms() -> u64 {
    300_000
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "postgresql://127.0.0.1:5432/waste");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080
  max_list_limit: 50

database:
  url: "postgresql://waste:secret@db:5432/waste"
  max_connections: 4
  connect_timeout_ms: 1000
  idle_timeout_ms: 60000

logging:
  level: "debug"
"#;
        let config = ServiceConfig::parse(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_list_limit, 50);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.logging.level, "debug");

        let store = config.store_config();
        assert_eq!(store.connect_timeout, Duration::from_secs(1));
        assert_eq!(store.idle_timeout, Duration::from_secs(60));
    }

    #[test]
    fn parse_partial_yaml_uses_defaults() {
        let config = ServiceConfig::parse("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database, DatabaseSection::default());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = ServiceConfig::parse("server: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (ENV_DATABASE_URL, "memory://"),
                (ENV_HOST, "127.0.0.1"),
                (ENV_PORT, " 4000 "),
            ]))
            .unwrap();
        assert_eq!(config.database.url, "memory://");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let mut config = ServiceConfig::default();
        let result = config.apply_overrides(lookup_from(&[(ENV_PORT, "eighty")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnv { name: ENV_PORT, .. })
        ));
    }

    #[test]
    fn server_config_carries_listener_fields() {
        let config = ServiceConfig::parse("server:\n  host: \"::1\"\n  port: 3100\n").unwrap();
        let server = config.server_config();
        assert_eq!(server.host, "::1");
        assert_eq!(server.port, 3100);
    }
}
