//! Shared application state for axum handlers.

use std::sync::Arc;

use devstock_app::ports::{CounterStore, InventoryStore, RandomSource};
use devstock_app::services::anagram_service::AnagramService;
use devstock_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the counter store, inventory store and random source to
/// avoid dynamic dispatch. `Clone` is implemented manually so the
/// underlying types themselves do not need to be `Clone`; only the `Arc`
/// wrappers are cloned.
pub struct AppState<C, S, R> {
    /// Anagram check and match counter.
    pub anagram_service: Arc<AnagramService<C>>,
    /// Device generation and aggregate queries.
    pub device_service: Arc<DeviceService<S, R>>,
}

impl<C, S, R> Clone for AppState<C, S, R> {
    fn clone(&self) -> Self {
        Self {
            anagram_service: Arc::clone(&self.anagram_service),
            device_service: Arc::clone(&self.device_service),
        }
    }
}

impl<C, S, R> AppState<C, S, R>
where
    C: CounterStore + Send + Sync + 'static,
    S: InventoryStore + Send + Sync + 'static,
    R: RandomSource + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(anagram_service: AnagramService<C>, device_service: DeviceService<S, R>) -> Self {
        Self {
            anagram_service: Arc::new(anagram_service),
            device_service: Arc::new(device_service),
        }
    }
}
