//! Common error types used across the workspace.
//!
//! Each adapter defines its own typed error and converts it into
//! [`DevstockError`] via `From`, boxing the source so the domain stays
//! free of IO crates.

/// Base error for every use-case in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum DevstockError {
    /// The relational store failed (connectivity, query or transaction).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The key-value counter store failed.
    #[error("counter store error")]
    Counter(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[test]
    fn should_expose_boxed_source_when_storage_fails() {
        let err = DevstockError::Storage(Box::new(Refused));
        assert_eq!(err.to_string(), "storage error");
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }

    #[test]
    fn should_expose_boxed_source_when_counter_fails() {
        let err = DevstockError::Counter(Box::new(Refused));
        assert_eq!(err.to_string(), "counter store error");
        assert!(err.source().is_some());
    }
}
