//! `PostgreSQL` implementation of [`InventoryStore`].

use std::future::Future;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction};

use devstock_app::ports::{InventoryStore, InventoryTransaction};
use devstock_domain::device::{DeviceTypeCount, NewDevice};
use devstock_domain::error::DevstockError;
use devstock_domain::id::DeviceId;

use crate::error::StorageError;

/// Wrapper for converting aggregate rows into domain [`DeviceTypeCount`].
struct Wrapper(DeviceTypeCount);

impl<'r> FromRow<'r, PgRow> for Wrapper {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self(DeviceTypeCount {
            dev_type: row.try_get("dev_type")?,
            count: row.try_get("count")?,
        }))
    }
}

const INSERT_DEVICES: &str = "INSERT INTO devices (dev_type, dev_id) \
     SELECT * FROM UNNEST($1::text[], $2::text[]) \
     RETURNING id::bigint";
const INSERT_ENDPOINTS: &str =
    "INSERT INTO endpoints (device_id) SELECT * FROM UNNEST($1::bigint[])";
const COUNT_UNATTACHED_BY_TYPE: &str = "SELECT dv.dev_type::text AS dev_type, COUNT(dv.dev_type) AS count \
     FROM devices dv \
     LEFT JOIN endpoints ep ON dv.id = ep.device_id \
     WHERE ep.device_id IS NULL \
     GROUP BY dv.dev_type \
     ORDER BY dv.dev_type";

/// `PostgreSQL`-backed device and endpoint store.
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl InventoryStore for PgInventoryStore {
    type Transaction = PgInventoryTransaction;

    fn begin(&self) -> impl Future<Output = Result<Self::Transaction, DevstockError>> + Send {
        let pool = self.pool.clone();
        async move {
            let tx = pool.begin().await.map_err(StorageError::from)?;
            Ok(PgInventoryTransaction { tx })
        }
    }

    fn count_unattached_by_type(
        &self,
    ) -> impl Future<Output = Result<Vec<DeviceTypeCount>, DevstockError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(COUNT_UNATTACHED_BY_TYPE)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}

/// Unit of work over a single pooled connection.
///
/// Dropping it without calling [`commit`](InventoryTransaction::commit)
/// rolls the transaction back when the connection returns to the pool.
pub struct PgInventoryTransaction {
    tx: Transaction<'static, Postgres>,
}

impl InventoryTransaction for PgInventoryTransaction {
    fn insert_devices(
        &mut self,
        devices: &[NewDevice],
    ) -> impl Future<Output = Result<Vec<DeviceId>, DevstockError>> + Send {
        let dev_types: Vec<String> = devices.iter().map(|d| d.dev_type.to_string()).collect();
        let dev_ids: Vec<String> = devices.iter().map(|d| d.dev_id.to_string()).collect();
        async move {
            let rows: Vec<(i64,)> = sqlx::query_as(INSERT_DEVICES)
                .bind(dev_types)
                .bind(dev_ids)
                .fetch_all(&mut *self.tx)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|(id,)| DeviceId::new(id)).collect())
        }
    }

    fn insert_endpoints(
        &mut self,
        device_ids: &[DeviceId],
    ) -> impl Future<Output = Result<(), DevstockError>> + Send {
        let ids: Vec<i64> = device_ids.iter().map(|id| id.get()).collect();
        async move {
            sqlx::query(INSERT_ENDPOINTS)
                .bind(ids)
                .execute(&mut *self.tx)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn commit(self) -> impl Future<Output = Result<(), DevstockError>> + Send {
        async move {
            self.tx.commit().await.map_err(StorageError::from)?;
            Ok(())
        }
    }

    fn rollback(self) -> impl Future<Output = Result<(), DevstockError>> + Send {
        async move {
            self.tx.rollback().await.map_err(StorageError::from)?;
            Ok(())
        }
    }
}
