use axum::extract::rejection::JsonRejection;

use super::{AuthError, DeviceError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Device error: {0}")]
    DeviceError(#[from] DeviceError),

    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            // enroll_id is the only unique column a request can collide on
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::DeviceError(DeviceError::EnrollIdExists)
            }
            _ => ApiError::DatabaseError(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::DeviceError(DeviceError::InvalidRequest(rejection.body_text()))
    }
}
