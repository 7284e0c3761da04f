//! Inventory port — devices and endpoints in the relational store.

use std::future::Future;

use devstock_domain::device::{DeviceTypeCount, NewDevice};
use devstock_domain::error::DevstockError;
use devstock_domain::id::DeviceId;

/// Relational store for devices and their endpoints.
pub trait InventoryStore {
    /// Unit of work returned by [`begin`](InventoryStore::begin).
    type Transaction: InventoryTransaction + Send;

    /// Open a new unit of work.
    fn begin(&self) -> impl Future<Output = Result<Self::Transaction, DevstockError>> + Send;

    /// Count devices without an endpoint, grouped by device type.
    ///
    /// Rows are ordered by `dev_type`. Types whose devices all have an
    /// endpoint do not appear.
    fn count_unattached_by_type(
        &self,
    ) -> impl Future<Output = Result<Vec<DeviceTypeCount>, DevstockError>> + Send;
}

/// Writes grouped in a single atomic unit.
///
/// Nothing is visible to other readers before [`commit`](Self::commit).
/// Dropping a transaction without committing discards every write.
pub trait InventoryTransaction {
    /// Insert devices and return the identifiers the store assigned.
    fn insert_devices(
        &mut self,
        devices: &[NewDevice],
    ) -> impl Future<Output = Result<Vec<DeviceId>, DevstockError>> + Send;

    /// Insert one endpoint per device id.
    fn insert_endpoints(
        &mut self,
        device_ids: &[DeviceId],
    ) -> impl Future<Output = Result<(), DevstockError>> + Send;

    /// Make every write of this unit visible.
    fn commit(self) -> impl Future<Output = Result<(), DevstockError>> + Send;

    /// Discard every write of this unit.
    fn rollback(self) -> impl Future<Output = Result<(), DevstockError>> + Send;
}
