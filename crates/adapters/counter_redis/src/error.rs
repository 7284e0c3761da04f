//! Counter-specific error type wrapping redis errors.

use devstock_domain::error::DevstockError;

/// Errors originating from the Redis counter store.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    /// A command or connection failed.
    #[error("redis error")]
    Redis(#[from] redis::RedisError),
}

impl From<CounterError> for DevstockError {
    fn from(err: CounterError) -> Self {
        Self::Counter(Box::new(err))
    }
}
