use std::sync::Arc;

use relaygate_api::models::DeviceStatus;
use sqlx::{Error, Pool, Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::Device;

/// Outcome of a registration keyed by enroll id.
#[derive(Debug, Clone)]
pub enum Upserted {
    Created(Device),
    Updated(Device),
}

impl Upserted {
    pub fn device(&self) -> &Device {
        match self {
            Upserted::Created(device) | Upserted::Updated(device) => device,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Upserted::Created(_))
    }
}

#[derive(Clone)]
pub struct DeviceRepository {
    storage: Arc<Storage>,
}

impl DeviceRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl DeviceRepository {
    /// Inserts the device or updates the one holding `enroll_id`, in a single
    /// statement. A fresh row has no `last_value`; an updated one gets `now`.
    pub async fn upsert(
        &self,
        enroll_id: &str,
        device_name: &str,
        status: DeviceStatus,
    ) -> Result<Upserted, Error> {
        let now = OffsetDateTime::now_utc();

        let device: Device = sqlx::query_as(
            r#"
            INSERT INTO devices (device_name, enroll_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (enroll_id) DO UPDATE
            SET device_name = excluded.device_name,
                status = excluded.status,
                last_value = excluded.created_at
            RETURNING *
            "#,
        )
        .bind(device_name)
        .bind(enroll_id)
        .bind(status.as_str())
        .bind(now)
        .fetch_one(self.storage.get_pool())
        .await?;

        if device.last_value.is_none() {
            Ok(Upserted::Created(device))
        } else {
            Ok(Upserted::Updated(device))
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(device)
    }

    pub async fn find_by_enroll_id(&self, enroll_id: &str) -> Result<Option<Device>, Error> {
        let device: Option<Device> = sqlx::query_as("SELECT * FROM devices WHERE enroll_id = $1")
            .bind(enroll_id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(device)
    }

    /// Returns `false` when no device matched `id`.
    pub async fn update_status(
        &self,
        id: i32,
        status: DeviceStatus,
        at: OffsetDateTime,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<bool, Error> {
        let affected = sqlx::query(
            r#"
            UPDATE devices
            SET status = $1, last_value = $2
            WHERE id = $3
            "#,
        )
        .bind(status.as_str())
        .bind(at)
        .bind(id)
        .execute(&mut **transaction)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}
