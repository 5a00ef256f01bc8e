use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router, middleware};
use relaygate_api::models::*;

use crate::errors::{ApiError, DeviceError};
use crate::middlewares::{TokenState, auth};
use crate::repositories::{DeviceLogRepository, DeviceRepository};
use crate::services::{DeviceService, TokenClaims, TokenService};

/// Number of log entries returned by `GET /device`.
pub const RECENT_LOG_LIMIT: i64 = 10;

pub const DEVICE_ON_MESSAGE: &str = "Dispositivo encendido.";
pub const DEVICE_OFF_MESSAGE: &str = "Dispositivo apagado.";

#[derive(Clone)]
pub struct DeviceState {
    pub device_repository: Arc<DeviceRepository>,
    pub device_log_repository: Arc<DeviceLogRepository>,
    pub device_service: Arc<DeviceService>,
    pub token_service: Arc<TokenService>,
}

pub fn device_router(device_state: DeviceState, token_state: TokenState) -> Router {
    let protected = Router::new()
        .route("/device-status", get(get_device_status))
        .route("/turn-on-device", post(turn_on_device))
        .route("/turn-off-device", post(turn_off_device))
        .route("/device", get(get_device_logs))
        .route_layer(middleware::from_fn_with_state(token_state, auth));

    Router::new()
        .route("/register-device", post(register_device))
        .route("/login-device", post(login_device))
        .merge(protected)
        .with_state(device_state)
}

#[utoipa::path(
    post,
    path = "/register-device",
    tag = "device",
    request_body = RegisterDeviceRequest,
    responses(
        (status = 201, description = "Device registered", body = DeviceResponse),
        (status = 200, description = "Existing device updated", body = DeviceResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Enroll id already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register_device(
    State(state): State<DeviceState>,
    payload: Result<Json<RegisterDeviceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DeviceResponse>), ApiError> {
    let Json(body) = payload?;

    if body.enroll_id.trim().is_empty() || body.device_name.trim().is_empty() {
        return Err(DeviceError::InvalidRequest(
            "enroll_id and device_name are required".to_string(),
        )
        .into());
    }

    let upserted = state
        .device_repository
        .upsert(&body.enroll_id, &body.device_name, body.status)
        .await?;

    let device = upserted.device();
    let status = if upserted.is_created() {
        tracing::info!(device_id = device.id, enroll_id = %device.enroll_id, "device registered");
        StatusCode::CREATED
    } else {
        tracing::info!(device_id = device.id, enroll_id = %device.enroll_id, "device re-registered");
        StatusCode::OK
    };

    Ok((status, Json(device.to_response()?)))
}

#[utoipa::path(
    post,
    path = "/login-device",
    tag = "device",
    request_body = LoginDeviceRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginDeviceResponse),
        (status = 400, description = "Missing enroll id"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_device(
    State(state): State<DeviceState>,
    payload: Result<Json<LoginDeviceRequest>, JsonRejection>,
) -> Result<Json<LoginDeviceResponse>, ApiError> {
    let Json(body) = payload?;

    if body.enroll_id.trim().is_empty() {
        return Err(DeviceError::InvalidRequest("enroll_id is required".to_string()).into());
    }

    let device = state
        .device_repository
        .find_by_enroll_id(&body.enroll_id)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    let token = state
        .token_service
        .generate_token(&device)
        .map_err(|e| anyhow!("Failed to generate token: {}", e))?
        .token;

    tracing::info!(device_id = device.id, "device logged in");

    Ok(Json(LoginDeviceResponse {
        device_name: device.device_name,
        enroll_id: device.enroll_id,
        token,
    }))
}

#[utoipa::path(
    get,
    path = "/device-status",
    tag = "device",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current device status", body = DeviceStatusResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device_status(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceState>,
) -> Result<Json<DeviceStatusResponse>, ApiError> {
    let device = state
        .device_repository
        .find_by_id(token_data.sub)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    Ok(Json(device.to_status_response()?))
}

#[utoipa::path(
    post,
    path = "/turn-on-device",
    tag = "device",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Device switched on", body = MessageResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn turn_on_device(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let transition = state.device_service.turn_on(token_data.sub).await?;

    tracing::info!(
        device_id = transition.device_id,
        status = %transition.status,
        at = %transition.at,
        "device switched on"
    );

    Ok(Json(MessageResponse::new(DEVICE_ON_MESSAGE)))
}

#[utoipa::path(
    post,
    path = "/turn-off-device",
    tag = "device",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Device switched off", body = MessageResponse),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn turn_off_device(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let transition = state.device_service.turn_off(token_data.sub).await?;

    tracing::info!(
        device_id = transition.device_id,
        status = %transition.status,
        at = %transition.at,
        "device switched off"
    );

    Ok(Json(MessageResponse::new(DEVICE_OFF_MESSAGE)))
}

#[utoipa::path(
    get,
    path = "/device",
    tag = "device",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Most recent transitions, newest first", body = Vec<DeviceLogResponse>),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device_logs(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceState>,
) -> Result<Json<Vec<DeviceLogResponse>>, ApiError> {
    state
        .device_repository
        .find_by_id(token_data.sub)
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    let logs = state
        .device_log_repository
        .find_recent_by_device_id(token_data.sub, RECENT_LOG_LIMIT)
        .await?;

    let responses = logs
        .iter()
        .map(|log| log.to_response())
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Json(responses))
}
