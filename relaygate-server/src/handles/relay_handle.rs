use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use relaygate_api::models::{RelayStatusResponse, RelaySwitchResponse};

use crate::errors::ApiError;
use crate::repositories::RelayRepository;

pub const RELAY_ON_MESSAGE: &str = "Relé encendido.";
pub const RELAY_OFF_MESSAGE: &str = "Relé apagado.";

#[derive(Clone)]
pub struct RelayState {
    pub relay_repository: Arc<RelayRepository>,
}

/// The global relay is shared by every client and needs no token.
pub fn relay_router(relay_state: RelayState) -> Router {
    Router::new()
        .route("/turn-on", post(turn_on_relay))
        .route("/turn-off", post(turn_off_relay))
        .route("/status", get(get_relay_status))
        .with_state(relay_state)
}

#[utoipa::path(
    post,
    path = "/turn-on",
    tag = "relay",
    responses(
        (status = 200, description = "Relay switched on", body = RelaySwitchResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn turn_on_relay(
    State(state): State<RelayState>,
) -> Result<Json<RelaySwitchResponse>, ApiError> {
    let relay = state.relay_repository.set_state(true).await?;

    tracing::info!("relay switched on");

    Ok(Json(RelaySwitchResponse {
        message: RELAY_ON_MESSAGE.to_string(),
        status: relay.is_on,
    }))
}

#[utoipa::path(
    post,
    path = "/turn-off",
    tag = "relay",
    responses(
        (status = 200, description = "Relay switched off", body = RelaySwitchResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn turn_off_relay(
    State(state): State<RelayState>,
) -> Result<Json<RelaySwitchResponse>, ApiError> {
    let relay = state.relay_repository.set_state(false).await?;

    tracing::info!("relay switched off");

    Ok(Json(RelaySwitchResponse {
        message: RELAY_OFF_MESSAGE.to_string(),
        status: relay.is_on,
    }))
}

#[utoipa::path(
    get,
    path = "/status",
    tag = "relay",
    responses(
        (status = 200, description = "Current relay status", body = RelayStatusResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_relay_status(
    State(state): State<RelayState>,
) -> Result<Json<RelayStatusResponse>, ApiError> {
    let status = state.relay_repository.is_on().await?;

    Ok(Json(RelayStatusResponse { status }))
}
