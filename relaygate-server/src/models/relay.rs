use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// Key of the only row the relay table may hold.
pub const RELAY_ID: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Relay {
    pub id: i32,
    pub is_on: bool,
    pub updated_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct RelayTable;

impl Table for RelayTable {
    fn name(&self) -> &'static str {
        "relay_state"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS relay_state (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                is_on BOOLEAN NOT NULL,
                updated_at TIMESTAMP NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS relay_state;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
