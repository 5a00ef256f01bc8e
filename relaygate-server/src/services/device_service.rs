use std::sync::Arc;

use relaygate_api::models::{DeviceAction, DeviceStatus, Id};
use time::OffsetDateTime;

use crate::errors::{ApiError, DeviceError};
use crate::repositories::{DeviceLogRepository, DeviceRepository};

/// A transition that has been committed together with its audit entry.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub device_id: Id,
    pub status: DeviceStatus,
    pub at: OffsetDateTime,
}

/// On/off state machine of a single device.
///
/// Every transition writes the new status and its log entry in one
/// transaction, so a device never reports a status without the matching
/// audit entry. Repeating a transition is allowed and logged again.
#[derive(Clone)]
pub struct DeviceService {
    device_repository: Arc<DeviceRepository>,
    device_log_repository: Arc<DeviceLogRepository>,
}

impl DeviceService {
    pub fn new(
        device_repository: Arc<DeviceRepository>,
        device_log_repository: Arc<DeviceLogRepository>,
    ) -> Self {
        Self {
            device_repository,
            device_log_repository,
        }
    }

    pub async fn turn_on(&self, device_id: Id) -> Result<Transition, ApiError> {
        self.transition(device_id, DeviceStatus::On).await
    }

    pub async fn turn_off(&self, device_id: Id) -> Result<Transition, ApiError> {
        self.transition(device_id, DeviceStatus::Off).await
    }

    async fn transition(&self, device_id: Id, status: DeviceStatus) -> Result<Transition, ApiError> {
        let at = OffsetDateTime::now_utc();
        let mut tx = self.device_repository.get_pool().begin().await?;

        let updated = self
            .device_repository
            .update_status(device_id, status, at, &mut tx)
            .await?;

        if !updated {
            return Err(DeviceError::DeviceNotFound.into());
        }

        self.device_log_repository
            .create(device_id, DeviceAction::from(status), at, &mut tx)
            .await?;

        tx.commit().await?;

        Ok(Transition {
            device_id,
            status,
            at,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::*;

    use super::*;

    fn service(storage: Arc<crate::configs::Storage>) -> DeviceService {
        DeviceService::new(
            Arc::new(DeviceRepository::new(storage.clone())),
            Arc::new(DeviceLogRepository::new(storage)),
        )
    }

    #[tokio::test]
    async fn test_turn_on_then_off_appends_two_entries() {
        let storage = setup_test_db().await;
        let device = create_test_device(storage.clone(), "E1", "D1", DeviceStatus::Off).await;
        let service = service(storage.clone());

        let on = service.turn_on(device.id).await.unwrap();
        let off = service.turn_off(device.id).await.unwrap();

        assert_eq!(on.status, DeviceStatus::On);
        assert_eq!(off.status, DeviceStatus::Off);

        let logs = DeviceLogRepository::new(storage.clone())
            .find_recent_by_device_id(device.id, 10)
            .await
            .unwrap();
        let actions: Vec<&str> = logs.iter().map(|log| log.action.as_str()).collect();
        assert_eq!(actions, vec!["OFF", "ON"]);

        let stored = DeviceRepository::new(storage)
            .find_by_id(device.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, "off");
        assert_eq!(stored.last_value, Some(off.at));
    }

    #[tokio::test]
    async fn test_repeated_turn_on_is_logged_each_time() {
        let storage = setup_test_db().await;
        let device = create_test_device(storage.clone(), "E1", "D1", DeviceStatus::Off).await;
        let service = service(storage.clone());

        service.turn_on(device.id).await.unwrap();
        service.turn_on(device.id).await.unwrap();

        let logs = DeviceLogRepository::new(storage)
            .find_recent_by_device_id(device.id, 10)
            .await
            .unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|log| log.action == "ON"));
    }

    #[tokio::test]
    async fn test_unknown_device_writes_nothing() {
        let storage = setup_test_db().await;
        let service = service(storage.clone());

        let result = service.turn_on(404).await;
        assert!(matches!(
            result,
            Err(ApiError::DeviceError(DeviceError::DeviceNotFound))
        ));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM device_logs")
            .fetch_one(storage.get_pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
