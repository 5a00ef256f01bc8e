use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, Header};

use crate::errors::{ApiError, AuthError};
use crate::services::TokenService;

#[derive(Clone)]
pub struct TokenState {
    pub token_service: Arc<TokenService>,
}

/// Rejects requests without a bearer token (401) or with one that fails
/// verification (403), and hands the verified claims to the handler.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let mut headers = req.headers().get_all(header::AUTHORIZATION).iter();

    let header: Authorization<Bearer> =
        Authorization::decode(&mut headers).map_err(|_| AuthError::MissingToken)?;

    let claims = state
        .token_service
        .retrieve_token_claims(header.token())
        .inspect_err(|e| tracing::debug!("rejected bearer token: {}", e))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
