//! # devstock-domain
//!
//! Pure domain model for the devstock inventory service.
//!
//! ## Responsibilities
//! - Foundational types: store-assigned identifiers, error conventions
//! - Define **Devices** (typed hardware records) and the catalog of device types
//! - Define the **generation batch** shape (how many devices, how many endpoints)
//! - Define the **anagram rule** and the name of the counter it feeds
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod anagram;
pub mod device;
