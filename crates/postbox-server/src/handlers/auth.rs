//! Authentication handlers

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{extract::State, Json};
use postbox_core::{TokenResponse, UserLogin, UserRegistration};
use tracing::info;

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserRegistration>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!("Signup attempt for: {}", req.email);

    let token = state.auth_service.signup(&req.email, &req.password).await?;

    Ok(Json(TokenResponse { token }))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UserLogin>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!("Login attempt for: {}", req.email);

    let token = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(TokenResponse { token }))
}
