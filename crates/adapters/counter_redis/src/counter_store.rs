//! Redis implementation of [`CounterStore`].

use std::future::Future;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use devstock_app::ports::CounterStore;
use devstock_domain::error::DevstockError;

use crate::error::CounterError;

/// Configuration for the Redis counter adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL (e.g. `redis://localhost` or `redis://:secret@cache:6379/2`).
    pub url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: "redis://localhost".to_string(),
        }
    }
}

impl Config {
    /// Read the URL from `DEVSTOCK_REDIS_URL`, falling back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("DEVSTOCK_REDIS_URL")
            .map(|url| Self { url })
            .unwrap_or_default()
    }

    /// Connect and build a [`RedisCounterStore`].
    ///
    /// # Errors
    ///
    /// Returns [`CounterError`] if the URL is malformed or the server is
    /// unreachable.
    pub async fn build(self) -> Result<RedisCounterStore, CounterError> {
        let client = redis::Client::open(self.url.as_str())?;
        let conn = client.get_connection_manager().await?;
        tracing::info!("connected to redis");
        Ok(RedisCounterStore { conn })
    }
}

/// Redis-backed counter store.
///
/// [`ConnectionManager`] is a cheap handle over one multiplexed
/// connection; each call clones it instead of locking.
pub struct RedisCounterStore {
    conn: ConnectionManager,
}

impl CounterStore for RedisCounterStore {
    fn reset(&self, name: &str) -> impl Future<Output = Result<(), DevstockError>> + Send {
        let mut conn = self.conn.clone();
        let key = name.to_string();
        async move {
            conn.set::<_, _, ()>(&key, 0_i64)
                .await
                .map_err(CounterError::from)?;
            Ok(())
        }
    }

    fn increment(&self, name: &str) -> impl Future<Output = Result<i64, DevstockError>> + Send {
        let mut conn = self.conn.clone();
        let key = name.to_string();
        async move {
            let value: i64 = conn.incr(&key, 1_i64).await.map_err(CounterError::from)?;
            Ok(value)
        }
    }

    fn get(&self, name: &str) -> impl Future<Output = Result<i64, DevstockError>> + Send {
        let mut conn = self.conn.clone();
        let key = name.to_string();
        async move {
            let value: Option<i64> = conn.get(&key).await.map_err(CounterError::from)?;
            Ok(value.unwrap_or(0))
        }
    }
}
