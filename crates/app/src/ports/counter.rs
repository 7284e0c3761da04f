//! Counter port — named integer counters shared by every request.

use std::future::Future;

use devstock_domain::error::DevstockError;

/// Store holding process-wide named counters.
///
/// Implementations must make [`increment`](CounterStore::increment) atomic
/// so concurrent callers never lose an update.
pub trait CounterStore {
    /// Set the counter `name` to zero.
    fn reset(&self, name: &str) -> impl Future<Output = Result<(), DevstockError>> + Send;

    /// Atomically add one to the counter `name` and return the new value.
    fn increment(&self, name: &str) -> impl Future<Output = Result<i64, DevstockError>> + Send;

    /// Read the counter `name`. A counter that was never written reads as zero.
    fn get(&self, name: &str) -> impl Future<Output = Result<i64, DevstockError>> + Send;
}
