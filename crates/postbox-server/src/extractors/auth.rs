//! Auth extractor for protected routes
//!
//! The session token travels as the `token` query parameter, not as an
//! `Authorization` header.

use crate::error::ApiError;
use crate::AppState;
use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use postbox_core::{PostboxError, User};
use serde::Deserialize;
use tracing::warn;

/// Authenticated user resolved from the request's token
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = Query::<TokenQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.token)
            .ok_or_else(|| {
                warn!("Request to {} without token", parts.uri.path());
                ApiError::from(PostboxError::TokenInvalid)
            })?;

        match state.auth_service.verify(&token).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(e) => {
                warn!("Rejected token on {}: {}", parts.uri.path(), e);
                Err(e.into())
            }
        }
    }
}
