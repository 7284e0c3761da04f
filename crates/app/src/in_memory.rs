//! In-process implementations of the storage ports.
//!
//! They back the HTTP and service tests of the workspace and behave like
//! the real adapters where it matters: counter increments are atomic,
//! transactions stage their writes until commit, and device ids come from
//! a sequence that a rollback does not rewind.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use devstock_domain::device::{Device, DeviceTypeCount, NewDevice};
use devstock_domain::error::DevstockError;
use devstock_domain::id::DeviceId;

use crate::ports::{CounterStore, InventoryStore, InventoryTransaction};

/// Failures injected by the in-memory stores.
#[derive(Debug, thiserror::Error)]
pub enum InMemoryError {
    /// The store was built as unreachable.
    #[error("store unavailable")]
    Unavailable,
    /// The endpoint insert was configured to fail.
    #[error("endpoint insert rejected")]
    EndpointInsertRejected,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Counter
// ---------------------------------------------------------------------------

/// [`CounterStore`] over a `HashMap`.
#[derive(Default)]
pub struct InMemoryCounterStore {
    counters: Mutex<HashMap<String, i64>>,
    unavailable: bool,
}

impl InMemoryCounterStore {
    /// A store whose every call fails, as if the server were unreachable.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn with_counters<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, i64>) -> T,
    ) -> Result<T, DevstockError> {
        if self.unavailable {
            return Err(DevstockError::Counter(Box::new(InMemoryError::Unavailable)));
        }
        Ok(f(&mut *lock(&self.counters)))
    }
}

impl CounterStore for InMemoryCounterStore {
    fn reset(&self, name: &str) -> impl Future<Output = Result<(), DevstockError>> + Send {
        let result = self.with_counters(|counters| {
            counters.insert(name.to_string(), 0);
        });
        async { result }
    }

    fn increment(&self, name: &str) -> impl Future<Output = Result<i64, DevstockError>> + Send {
        let result = self.with_counters(|counters| {
            let value = counters.entry(name.to_string()).or_insert(0);
            *value += 1;
            *value
        });
        async { result }
    }

    fn get(&self, name: &str) -> impl Future<Output = Result<i64, DevstockError>> + Send {
        let result = self.with_counters(|counters| counters.get(name).copied().unwrap_or(0));
        async { result }
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Tables {
    last_id: i64,
    devices: Vec<Device>,
    endpoints: Vec<DeviceId>,
}

/// [`InventoryStore`] over shared vectors.
#[derive(Default)]
pub struct InMemoryInventoryStore {
    tables: Arc<Mutex<Tables>>,
    reject_endpoints: bool,
}

impl InMemoryInventoryStore {
    /// A store whose transactions fail on `insert_endpoints`.
    #[must_use]
    pub fn failing_endpoint_insert() -> Self {
        Self {
            reject_endpoints: true,
            ..Self::default()
        }
    }

    /// Snapshot of every committed device, in insertion order.
    #[must_use]
    pub fn devices(&self) -> Vec<Device> {
        lock(&self.tables).devices.clone()
    }

    /// Snapshot of every committed endpoint's device id, in insertion order.
    #[must_use]
    pub fn endpoints(&self) -> Vec<DeviceId> {
        lock(&self.tables).endpoints.clone()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    type Transaction = InMemoryTransaction;

    fn begin(&self) -> impl Future<Output = Result<Self::Transaction, DevstockError>> + Send {
        let tx = InMemoryTransaction {
            tables: Arc::clone(&self.tables),
            reject_endpoints: self.reject_endpoints,
            devices: Vec::new(),
            endpoints: Vec::new(),
        };
        async { Ok(tx) }
    }

    fn count_unattached_by_type(
        &self,
    ) -> impl Future<Output = Result<Vec<DeviceTypeCount>, DevstockError>> + Send {
        let tables = lock(&self.tables);
        let attached: HashSet<DeviceId> = tables.endpoints.iter().copied().collect();
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for device in tables.devices.iter().filter(|d| !attached.contains(&d.id)) {
            *counts.entry(device.dev_type.as_str()).or_insert(0) += 1;
        }
        let rows: Vec<DeviceTypeCount> = counts
            .into_iter()
            .map(|(dev_type, count)| DeviceTypeCount {
                dev_type: dev_type.to_string(),
                count,
            })
            .collect();
        async { Ok(rows) }
    }
}

/// Unit of work of [`InMemoryInventoryStore`].
///
/// Writes are staged locally and only reach the shared tables on commit.
pub struct InMemoryTransaction {
    tables: Arc<Mutex<Tables>>,
    reject_endpoints: bool,
    devices: Vec<Device>,
    endpoints: Vec<DeviceId>,
}

impl InventoryTransaction for InMemoryTransaction {
    fn insert_devices(
        &mut self,
        devices: &[NewDevice],
    ) -> impl Future<Output = Result<Vec<DeviceId>, DevstockError>> + Send {
        let mut tables = lock(&self.tables);
        let mut ids = Vec::with_capacity(devices.len());
        for device in devices {
            tables.last_id += 1;
            let id = DeviceId::new(tables.last_id);
            self.devices.push(device.clone().persisted(id));
            ids.push(id);
        }
        drop(tables);
        async { Ok(ids) }
    }

    fn insert_endpoints(
        &mut self,
        device_ids: &[DeviceId],
    ) -> impl Future<Output = Result<(), DevstockError>> + Send {
        let result = if self.reject_endpoints {
            Err(DevstockError::Storage(Box::new(
                InMemoryError::EndpointInsertRejected,
            )))
        } else {
            self.endpoints.extend_from_slice(device_ids);
            Ok(())
        };
        async { result }
    }

    fn commit(self) -> impl Future<Output = Result<(), DevstockError>> + Send {
        let mut tables = lock(&self.tables);
        tables.devices.extend(self.devices);
        tables.endpoints.extend(self.endpoints);
        drop(tables);
        async { Ok(()) }
    }

    fn rollback(self) -> impl Future<Output = Result<(), DevstockError>> + Send {
        drop(self);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use devstock_domain::device::{DevType, HardwareId};

    use super::*;

    fn new_device(dev_type: DevType) -> NewDevice {
        NewDevice {
            dev_type,
            dev_id: HardwareId::from_bytes([0; 6]),
        }
    }

    #[tokio::test]
    async fn should_read_zero_when_counter_never_written() {
        let store = InMemoryCounterStore::default();
        assert_eq!(store.get("missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_increment_and_reset_counter() {
        let store = InMemoryCounterStore::default();
        assert_eq!(store.increment("c").await.unwrap(), 1);
        assert_eq!(store.increment("c").await.unwrap(), 2);
        store.reset("c").await.unwrap();
        assert_eq!(store.get("c").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_fail_every_call_when_counter_unavailable() {
        let store = InMemoryCounterStore::unavailable();
        assert!(matches!(
            store.increment("c").await,
            Err(DevstockError::Counter(_))
        ));
        assert!(store.reset("c").await.is_err());
        assert!(store.get("c").await.is_err());
    }

    #[tokio::test]
    async fn should_hide_writes_until_commit() {
        let store = InMemoryInventoryStore::default();
        let mut tx = store.begin().await.unwrap();
        let ids = tx
            .insert_devices(&[new_device(DevType::Gsm), new_device(DevType::Lora)])
            .await
            .unwrap();
        tx.insert_endpoints(&ids[..1]).await.unwrap();
        assert!(store.devices().is_empty());

        tx.commit().await.unwrap();
        assert_eq!(store.devices().len(), 2);
        assert_eq!(store.endpoints(), vec![ids[0]]);
    }

    #[tokio::test]
    async fn should_discard_writes_when_dropped() {
        let store = InMemoryInventoryStore::default();
        let mut tx = store.begin().await.unwrap();
        tx.insert_devices(&[new_device(DevType::Gsm)]).await.unwrap();
        drop(tx);
        assert!(store.devices().is_empty());
    }

    #[tokio::test]
    async fn should_not_reuse_ids_after_rollback() {
        let store = InMemoryInventoryStore::default();
        let mut tx = store.begin().await.unwrap();
        let first = tx.insert_devices(&[new_device(DevType::Gsm)]).await.unwrap();
        tx.rollback().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        let second = tx.insert_devices(&[new_device(DevType::Gsm)]).await.unwrap();
        tx.commit().await.unwrap();
        assert!(second[0] > first[0]);
    }

    #[tokio::test]
    async fn should_count_only_devices_without_endpoint() {
        let store = InMemoryInventoryStore::default();
        let mut tx = store.begin().await.unwrap();
        let ids = tx
            .insert_devices(&[
                new_device(DevType::Zigbee),
                new_device(DevType::Zigbee),
                new_device(DevType::Emeter),
                new_device(DevType::Gsm),
            ])
            .await
            .unwrap();
        tx.insert_endpoints(&[ids[0], ids[3]]).await.unwrap();
        tx.commit().await.unwrap();

        let rows = store.count_unattached_by_type().await.unwrap();
        assert_eq!(
            rows,
            vec![
                DeviceTypeCount {
                    dev_type: "emeter".to_string(),
                    count: 1,
                },
                DeviceTypeCount {
                    dev_type: "zigbee".to_string(),
                    count: 1,
                },
            ]
        );
    }

    #[tokio::test]
    async fn should_reject_endpoint_insert_when_configured() {
        let store = InMemoryInventoryStore::failing_endpoint_insert();
        let mut tx = store.begin().await.unwrap();
        let ids = tx.insert_devices(&[new_device(DevType::Gsm)]).await.unwrap();
        let result = tx.insert_endpoints(&ids).await;
        assert!(matches!(result, Err(DevstockError::Storage(_))));
    }
}
