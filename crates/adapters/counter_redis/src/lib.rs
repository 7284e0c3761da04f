//! # devstock-adapter-counter-redis
//!
//! Key-value counter adapter backed by [redis](https://docs.rs/redis).
//!
//! ## Responsibilities
//! - Implement the `CounterStore` port defined in `devstock-app::ports::counter`
//! - Hold a reconnecting [`ConnectionManager`](redis::aio::ConnectionManager)
//!   shared by every request
//! - Use the server-side `INCR` so concurrent increments never lose updates
//!
//! ## Dependency rule
//! Depends on `devstock-app` (for port traits) and `devstock-domain` (for error types).
//! The `app` and `domain` crates must never reference this adapter.

mod counter_store;
mod error;

pub use counter_store::{Config, RedisCounterStore};
pub use error::CounterError;
