use std::sync::Arc;

use sqlx::Error;
use time::OffsetDateTime;

use crate::configs::Storage;
use crate::models::{RELAY_ID, Relay};

#[derive(Clone)]
pub struct RelayRepository {
    storage: Arc<Storage>,
}

impl RelayRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl RelayRepository {
    /// Writes the relay row, creating it on first use. Repeating the same
    /// state only refreshes `updated_at`.
    pub async fn set_state(&self, is_on: bool) -> Result<Relay, Error> {
        let state: Relay = sqlx::query_as(
            r#"
            INSERT INTO relay_state (id, is_on, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET is_on = excluded.is_on, updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(RELAY_ID)
        .bind(is_on)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(state)
    }

    pub async fn find_state(&self) -> Result<Option<Relay>, Error> {
        let state: Option<Relay> = sqlx::query_as("SELECT * FROM relay_state WHERE id = $1")
            .bind(RELAY_ID)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(state)
    }

    /// A relay that was never switched reads as off.
    pub async fn is_on(&self) -> Result<bool, Error> {
        Ok(self.find_state().await?.is_some_and(|state| state.is_on))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::*;

    use super::*;

    #[tokio::test]
    async fn test_relay_defaults_to_off() {
        let storage = setup_test_db().await;
        let repo = RelayRepository::new(storage);

        assert!(repo.find_state().await.unwrap().is_none());
        assert!(!repo.is_on().await.unwrap());
    }

    #[tokio::test]
    async fn test_relay_switching_is_idempotent() {
        let storage = setup_test_db().await;
        let repo = RelayRepository::new(storage.clone());

        repo.set_state(true).await.unwrap();
        repo.set_state(true).await.unwrap();
        assert!(repo.is_on().await.unwrap());

        repo.set_state(false).await.unwrap();
        assert!(!repo.is_on().await.unwrap());

        repo.set_state(false).await.unwrap();
        assert!(!repo.is_on().await.unwrap());

        let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM relay_state")
            .fetch_one(storage.get_pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_second_relay_row_is_rejected() {
        let storage = setup_test_db().await;

        let result = sqlx::query("INSERT INTO relay_state (id, is_on, updated_at) VALUES (2, 1, $1)")
            .bind(OffsetDateTime::now_utc())
            .execute(storage.get_pool())
            .await;

        assert!(result.is_err());
    }
}
