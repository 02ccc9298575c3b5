//! HTTP mapping of service errors

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use postbox_core::{Detail, PostboxError};

/// Error on its way out as an HTTP response
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] PostboxError),

    /// Request axum could not read, with the status it chose for it
    #[error("{1}")]
    Rejected(StatusCode, String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                PostboxError::Validation(rejection.body_text()).into()
            }
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        PostboxError::Validation(rejection.body_text()).into()
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        let err = match self {
            ApiError::Service(err) => err,
            ApiError::Rejected(status, _) => return *status,
        };

        match err {
            PostboxError::DuplicateEmail | PostboxError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            PostboxError::TokenExpired | PostboxError::TokenInvalid => StatusCode::UNAUTHORIZED,
            PostboxError::PostNotFound => StatusCode::NOT_FOUND,
            PostboxError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PostboxError::PasswordHash(_) | PostboxError::Token(_) | PostboxError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Service(err) if !err.is_client_error() => {
                tracing::error!("Internal error: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(Detail::new(detail))).into_response()
    }
}
