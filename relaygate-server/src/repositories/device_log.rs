use std::sync::Arc;

use relaygate_api::models::DeviceAction;
use sqlx::{Error, Sqlite, Transaction};
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::DeviceLog;

#[derive(Clone)]
pub struct DeviceLogRepository {
    storage: Arc<Storage>,
}

impl DeviceLogRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl DeviceLogRepository {
    pub async fn create(
        &self,
        device_id: i32,
        action: DeviceAction,
        timestamp: OffsetDateTime,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO device_logs (device_id, action, timestamp)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(device_id)
        .bind(action.as_str())
        .bind(timestamp)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    /// Newest first; entries sharing a timestamp fall back to insertion order.
    pub async fn find_recent_by_device_id(
        &self,
        device_id: i32,
        limit: i64,
    ) -> Result<Vec<DeviceLog>, Error> {
        let logs: Vec<DeviceLog> = sqlx::query_as(
            r#"
            SELECT * FROM device_logs
            WHERE device_id = $1
            ORDER BY timestamp DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(logs)
    }
}
