use relaygate_api::models::{DeviceAction, DeviceLogResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// Append-only audit entry, one per state transition.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeviceLog {
    pub id: i32,
    pub device_id: i32,
    pub action: String,
    pub timestamp: OffsetDateTime,
}

impl DeviceLog {
    pub fn to_response(&self) -> anyhow::Result<DeviceLogResponse> {
        let action: DeviceAction = self
            .action
            .parse::<DeviceAction>()
            .map_err(|e| anyhow::anyhow!("Device log {} has corrupt action: {}", self.id, e))?;

        Ok(DeviceLogResponse {
            action,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Clone)]
pub struct DeviceLogTable;

impl Table for DeviceLogTable {
    fn name(&self) -> &'static str {
        "device_logs"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS device_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id INTEGER NOT NULL,
                action TEXT NOT NULL CHECK (action IN ('ON', 'OFF')),
                timestamp TIMESTAMP NOT NULL,
                FOREIGN KEY (device_id) REFERENCES devices (id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_device_logs_device_time
                ON device_logs (device_id, timestamp DESC);
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS device_logs;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["devices"]
    }
}
