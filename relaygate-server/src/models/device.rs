use relaygate_api::models::{DeviceResponse, DeviceStatus, DeviceStatusResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: i32,
    pub device_name: String,
    pub enroll_id: String,
    /// Either `on` or `off`, enforced by a CHECK constraint
    pub status: String,
    /// The time of the last transition
    pub last_value: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl Device {
    pub fn status(&self) -> anyhow::Result<DeviceStatus> {
        self.status
            .parse::<DeviceStatus>()
            .map_err(|e| anyhow::anyhow!("Device {} has corrupt status: {}", self.id, e))
    }

    pub fn to_response(&self) -> anyhow::Result<DeviceResponse> {
        Ok(DeviceResponse {
            id: self.id,
            device_name: self.device_name.clone(),
            enroll_id: self.enroll_id.clone(),
            status: self.status()?,
            last_value: self.last_value,
            created_at: self.created_at,
        })
    }

    pub fn to_status_response(&self) -> anyhow::Result<DeviceStatusResponse> {
        Ok(DeviceStatusResponse {
            status: self.status()?,
            last_value: self.last_value,
        })
    }
}

#[derive(Clone)]
pub struct DeviceTable;

impl Table for DeviceTable {
    fn name(&self) -> &'static str {
        "devices"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_name VARCHAR(255) NOT NULL,
                enroll_id VARCHAR(255) NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'off' CHECK (status IN ('on', 'off')),
                last_value TIMESTAMP,
                created_at TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS devices;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
