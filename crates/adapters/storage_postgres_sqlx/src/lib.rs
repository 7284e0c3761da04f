//! # devstock-adapter-storage-postgres-sqlx
//!
//! `PostgreSQL` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the inventory port traits defined in `devstock-app::ports::inventory`
//! - Manage the `PostgreSQL` connection pool lifecycle
//! - Optionally run embedded migrations for the `devices` / `endpoints` schema
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `devstock-app` (for port traits) and `devstock-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod inventory_store;
mod pool;

pub use error::StorageError;
pub use inventory_store::{PgInventoryStore, PgInventoryTransaction};
pub use pool::{Config, Database};
