//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `devstock.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Counter store settings.
    pub redis: RedisConfig,
    /// Relational store settings.
    pub postgres: PostgresConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Redis counter store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis connection URL.
    pub url: String,
}

/// `PostgreSQL` configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Pool size shared by all requests.
    pub max_connections: u32,
    /// Create missing tables on startup.
    pub migrate: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `devstock.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("devstock.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("DEVSTOCK_HOST") {
            self.server.host = val;
        }
        if let Some(port) = lookup("DEVSTOCK_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = lookup("DEVSTOCK_REDIS_URL") {
            self.redis.url = val;
        }
        if let Some(val) = lookup("DEVSTOCK_POSTGRES_HOST") {
            self.postgres.host = val;
        }
        if let Some(port) = lookup("DEVSTOCK_POSTGRES_PORT").and_then(|val| val.parse().ok()) {
            self.postgres.port = port;
        }
        if let Some(val) = lookup("DEVSTOCK_POSTGRES_USER") {
            self.postgres.user = val;
        }
        if let Some(val) = lookup("DEVSTOCK_POSTGRES_PASSWORD") {
            self.postgres.password = val;
        }
        if let Some(val) = lookup("DEVSTOCK_POSTGRES_DATABASE") {
            self.postgres.database = val;
        }
        if let Some(val) = lookup("DEVSTOCK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.redis.url.is_empty() {
            return Err(ConfigError::Validation(
                "redis url must not be empty".to_string(),
            ));
        }
        if self.postgres.max_connections == 0 {
            return Err(ConfigError::Validation(
                "postgres max_connections must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Settings for the `PostgreSQL` adapter.
    #[must_use]
    pub fn storage(&self) -> devstock_adapter_storage_postgres_sqlx::Config {
        devstock_adapter_storage_postgres_sqlx::Config {
            host: self.postgres.host.clone(),
            port: self.postgres.port,
            user: self.postgres.user.clone(),
            password: self.postgres.password.clone(),
            database: self.postgres.database.clone(),
            max_connections: self.postgres.max_connections,
            migrate: self.postgres.migrate,
        }
    }

    /// Settings for the Redis adapter.
    #[must_use]
    pub fn counter(&self) -> devstock_adapter_counter_redis::Config {
        devstock_adapter_counter_redis::Config {
            url: self.redis.url.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost".to_string(),
        }
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            max_connections: 5,
            migrate: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "devstockd=info,devstock=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
