//! Device service — use-cases for the device inventory.

use devstock_domain::device::{
    DEVICES_PER_BATCH, DeviceTypeCount, ENDPOINTS_PER_BATCH, GeneratedBatch, NewDevice,
};
use devstock_domain::error::DevstockError;

use crate::ports::{InventoryStore, InventoryTransaction, RandomSource};

/// Application service for generating and querying devices.
pub struct DeviceService<S, R> {
    store: S,
    random: R,
}

impl<S, R> DeviceService<S, R>
where
    S: InventoryStore,
    R: RandomSource,
{
    /// Create a new service backed by the given store and random source.
    pub fn new(store: S, random: R) -> Self {
        Self { store, random }
    }

    /// Synthesize a batch of devices and attach endpoints to part of it.
    ///
    /// Every write happens in one unit of work: either all devices and
    /// endpoints become visible, or none do.
    ///
    /// # Errors
    ///
    /// Returns [`DevstockError::Storage`] if any step fails. The unit of
    /// work is rolled back before the error is returned.
    #[tracing::instrument(skip(self))]
    pub async fn generate_batch(&self) -> Result<GeneratedBatch, DevstockError> {
        let devices: Vec<NewDevice> = (0..DEVICES_PER_BATCH)
            .map(|_| NewDevice {
                dev_type: self.random.dev_type(),
                dev_id: self.random.hardware_id(),
            })
            .collect();

        let mut tx = self.store.begin().await?;
        match self.write_batch(&mut tx, &devices).await {
            Ok(batch) => {
                tx.commit().await?;
                tracing::info!(
                    devices = batch.device_ids.len(),
                    endpoints = batch.endpoint_device_ids.len(),
                    "device batch generated"
                );
                Ok(batch)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "failed to roll back device batch");
                }
                Err(err)
            }
        }
    }

    async fn write_batch(
        &self,
        tx: &mut S::Transaction,
        devices: &[NewDevice],
    ) -> Result<GeneratedBatch, DevstockError> {
        let device_ids = tx.insert_devices(devices).await?;
        let endpoint_device_ids = self.random.sample(&device_ids, ENDPOINTS_PER_BATCH);
        tx.insert_endpoints(&endpoint_device_ids).await?;
        Ok(GeneratedBatch {
            device_ids,
            endpoint_device_ids,
        })
    }

    /// Count devices without an endpoint, grouped by type.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn count_unattached_by_type(&self) -> Result<Vec<DeviceTypeCount>, DevstockError> {
        self.store.count_unattached_by_type().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use devstock_domain::device::{DevType, HardwareId};
    use devstock_domain::id::DeviceId;

    use super::*;
    use crate::in_memory::InMemoryInventoryStore;
    use crate::random::StdRandom;

    /// Cycles through a fixed list of types and always samples the first ids.
    struct ScriptedRandom {
        types: Vec<DevType>,
        next: AtomicUsize,
    }

    impl ScriptedRandom {
        fn new(types: Vec<DevType>) -> Self {
            Self {
                types,
                next: AtomicUsize::new(0),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn dev_type(&self) -> DevType {
            let index = self.next.fetch_add(1, Ordering::Relaxed);
            self.types[index % self.types.len()]
        }

        fn hardware_id(&self) -> HardwareId {
            HardwareId::from_bytes([0xaa; 6])
        }

        fn sample(&self, ids: &[DeviceId], amount: usize) -> Vec<DeviceId> {
            ids.iter().take(amount).copied().collect()
        }
    }

    fn make_service() -> DeviceService<InMemoryInventoryStore, StdRandom> {
        DeviceService::new(InMemoryInventoryStore::default(), StdRandom::seeded(42))
    }

    #[tokio::test]
    async fn should_insert_ten_devices_and_five_endpoints() {
        let service = make_service();
        let batch = service.generate_batch().await.unwrap();

        assert_eq!(batch.device_ids.len(), DEVICES_PER_BATCH);
        assert_eq!(batch.endpoint_device_ids.len(), ENDPOINTS_PER_BATCH);
        assert_eq!(service.store.devices().len(), DEVICES_PER_BATCH);
        assert_eq!(service.store.endpoints().len(), ENDPOINTS_PER_BATCH);
    }

    #[tokio::test]
    async fn should_attach_endpoints_only_to_distinct_new_devices() {
        let service = make_service();
        let batch = service.generate_batch().await.unwrap();

        let unique: HashSet<DeviceId> = batch.endpoint_device_ids.iter().copied().collect();
        assert_eq!(unique.len(), ENDPOINTS_PER_BATCH);
        for id in service.store.endpoints() {
            assert!(batch.device_ids.contains(&id));
        }
    }

    #[tokio::test]
    async fn should_accumulate_across_calls() {
        let service = make_service();
        service.generate_batch().await.unwrap();
        service.generate_batch().await.unwrap();

        assert_eq!(service.store.devices().len(), 2 * DEVICES_PER_BATCH);
        assert_eq!(service.store.endpoints().len(), 2 * ENDPOINTS_PER_BATCH);
    }

    #[tokio::test]
    async fn should_leave_nothing_visible_when_endpoint_insert_fails() {
        let service = DeviceService::new(
            InMemoryInventoryStore::failing_endpoint_insert(),
            StdRandom::seeded(1),
        );

        let result = service.generate_batch().await;

        assert!(matches!(result, Err(DevstockError::Storage(_))));
        assert!(service.store.devices().is_empty());
        assert!(service.store.endpoints().is_empty());
        assert!(service.count_unattached_by_type().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_count_every_unattached_device_once() {
        let service = make_service();
        service.generate_batch().await.unwrap();

        let rows = service.count_unattached_by_type().await.unwrap();
        let total: i64 = rows.iter().map(|row| row.count).sum();
        assert_eq!(total, 5);
        assert!(rows.iter().all(|row| row.count > 0));
    }

    #[tokio::test]
    async fn should_omit_type_when_every_device_of_it_has_endpoint() {
        // First five devices are zigbee and receive the endpoints.
        let mut script = vec![DevType::Zigbee; 5];
        script.extend([
            DevType::Emeter,
            DevType::Lora,
            DevType::Gsm,
            DevType::Emeter,
            DevType::Lora,
        ]);
        let service = DeviceService::new(
            InMemoryInventoryStore::default(),
            ScriptedRandom::new(script),
        );

        service.generate_batch().await.unwrap();
        let rows = service.count_unattached_by_type().await.unwrap();

        assert_eq!(
            rows,
            vec![
                DeviceTypeCount {
                    dev_type: "emeter".to_string(),
                    count: 2,
                },
                DeviceTypeCount {
                    dev_type: "gsm".to_string(),
                    count: 1,
                },
                DeviceTypeCount {
                    dev_type: "lora".to_string(),
                    count: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn should_keep_type_when_one_of_its_devices_lacks_endpoint() {
        let service = DeviceService::new(
            InMemoryInventoryStore::default(),
            ScriptedRandom::new(vec![DevType::Zigbee]),
        );

        service.generate_batch().await.unwrap();
        let rows = service.count_unattached_by_type().await.unwrap();

        assert_eq!(
            rows,
            vec![DeviceTypeCount {
                dev_type: "zigbee".to_string(),
                count: 5,
            }]
        );
    }

    #[tokio::test]
    async fn should_return_identical_rows_when_queried_twice() {
        let service = make_service();
        service.generate_batch().await.unwrap();

        let first = service.count_unattached_by_type().await.unwrap();
        let second = service.count_unattached_by_type().await.unwrap();
        assert_eq!(first, second);
    }
}
