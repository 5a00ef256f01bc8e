use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::configs::{Auth, SchemaManager, Settings, Storage};
use crate::handles::{DeviceState, RelayState, device_handle, device_router, relay_handle, relay_router};
use crate::middlewares::TokenState;
use crate::repositories::{DeviceLogRepository, DeviceRepository, RelayRepository};
use crate::services::{DeviceService, TokenService};

#[derive(OpenApi)]
#[openapi(
    paths(
        device_handle::register_device,
        device_handle::login_device,
        device_handle::get_device_status,
        device_handle::turn_on_device,
        device_handle::turn_off_device,
        device_handle::get_device_logs,
        relay_handle::turn_on_relay,
        relay_handle::turn_off_relay,
        relay_handle::get_relay_status,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "device", description = "Device registration, login and on/off state"),
        (name = "relay", description = "Global relay switch")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub async fn create_app(settings: &Arc<Settings>) -> Result<Router, sqlx::Error> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    Ok(create_router(storage, settings.auth.clone()))
}

pub fn create_router(storage: Arc<Storage>, auth: Auth) -> Router {
    let token_service = Arc::new(TokenService::new(auth));
    let device_repository = Arc::new(DeviceRepository::new(storage.clone()));
    let device_log_repository = Arc::new(DeviceLogRepository::new(storage.clone()));
    let relay_repository = Arc::new(RelayRepository::new(storage.clone()));
    let device_service = Arc::new(DeviceService::new(
        device_repository.clone(),
        device_log_repository.clone(),
    ));

    let token_state = TokenState {
        token_service: token_service.clone(),
    };

    let devices = device_router(
        DeviceState {
            device_repository,
            device_log_repository,
            device_service,
            token_service,
        },
        token_state,
    );

    let relay = relay_router(RelayState { relay_repository });

    Router::new()
        .merge(devices)
        .merge(relay)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
