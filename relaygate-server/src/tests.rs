//! Fixtures shared by unit tests and the integration suite.

use std::sync::Arc;

use relaygate_api::models::DeviceStatus;
use time::OffsetDateTime;

use crate::configs::{Database, SchemaManager, Storage};
use crate::models::Device;

pub async fn setup_test_db() -> Arc<Storage> {
    Arc::new(
        Storage::new(
            Database {
                url: String::from("sqlite::memory:"),
                clean_start: true,
                max_connections: 1,
            },
            SchemaManager::default(),
        )
        .await
        .unwrap(),
    )
}

pub async fn create_test_device(
    storage: Arc<Storage>,
    enroll_id: &str,
    device_name: &str,
    status: DeviceStatus,
) -> Device {
    sqlx::query_as::<_, Device>(
        r#"
        INSERT INTO devices (device_name, enroll_id, status, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *;
        "#,
    )
    .bind(device_name)
    .bind(enroll_id)
    .bind(status.as_str())
    .bind(OffsetDateTime::now_utc())
    .fetch_one(storage.get_pool())
    .await
    .unwrap()
}
