//! # devstock-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CounterStore` — named integer counters with atomic increment
//!   - `InventoryStore` — device/endpoint persistence behind a unit of work
//!   - `RandomSource` — device synthesis and sampling
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AnagramService` — compare two strings, count positive matches
//!   - `DeviceService` — generate a device batch, report unattached devices
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (seedable random source; in-memory stores behind the `test-utils` feature)
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `devstock-domain` only (plus `rand` for the random source).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

#[cfg(any(test, feature = "test-utils"))]
pub mod in_memory;
pub mod ports;
pub mod random;
pub mod services;
