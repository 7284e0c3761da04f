//! `PostgreSQL` connection pool setup and migration runner.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::error::StorageError;

/// Configuration for the `PostgreSQL` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Upper bound of pooled connections shared by all requests.
    pub max_connections: u32,
    /// Create the `devices` / `endpoints` tables when they are missing.
    pub migrate: bool,
}

impl Default for Config {
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

impl Config {
    /// Read configuration from `DEVSTOCK_POSTGRES_*` environment variables,
    /// falling back to defaults for unset or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(val) = std::env::var("DEVSTOCK_POSTGRES_HOST") {
            config.host = val;
        }
        if let Some(port) = std::env::var("DEVSTOCK_POSTGRES_PORT")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            config.port = port;
        }
        if let Ok(val) = std::env::var("DEVSTOCK_POSTGRES_USER") {
            config.user = val;
        }
        if let Ok(val) = std::env::var("DEVSTOCK_POSTGRES_PASSWORD") {
            config.password = val;
        }
        if let Ok(val) = std::env::var("DEVSTOCK_POSTGRES_DATABASE") {
            config.database = val;
        }
        config
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool and, when `migrate` is set, runs all
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self).await
    }
}

/// Holds the `PostgreSQL` connection pool and provides access to it.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to the database and optionally run migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail.
    async fn initialize(config: &Config) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        tracing::info!(host = %config.host, database = %config.database, "connected to postgres");

        if config.migrate {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("postgres migrations applied");
        }

        Ok(Self { pool })
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Wait for in-flight queries and close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_local_defaults() {
        let config = Config::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
        assert_eq!(config.database, "postgres");
        assert!(config.password.is_empty());
        assert!(!config.migrate);
    }

    #[test]
    fn should_carry_fields_into_connect_options() {
        let config = Config {
            host: "db.internal".to_string(),
            port: 6543,
            database: "inventory".to_string(),
            ..Config::default()
        };
        let options = config.connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("inventory"));
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL (DEVSTOCK_POSTGRES_*)"]
    async fn should_create_pool_and_run_migrations() {
        let config = Config {
            migrate: true,
            ..Config::from_env()
        };
        let db = config.build().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT table_name::text FROM information_schema.tables WHERE table_schema = 'public' ORDER BY table_name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|row| row.0.as_str()).collect();
        assert!(names.contains(&"devices"), "missing devices table");
        assert!(names.contains(&"endpoints"), "missing endpoints table");
        db.close().await;
    }
}
