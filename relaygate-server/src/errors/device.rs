use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Device not found")]
    DeviceNotFound,

    #[error("Enroll id already exists")]
    EnrollIdExists,

    #[error("Invalid request parameters: {0}")]
    InvalidRequest(String),
}

impl DeviceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeviceError::DeviceNotFound => StatusCode::NOT_FOUND,
            DeviceError::EnrollIdExists => StatusCode::CONFLICT,
            DeviceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}
