//! Error types for Postbox

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PostboxError>;

#[derive(Error, Debug)]
pub enum PostboxError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Post not found")]
    PostNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl PostboxError {
    /// Errors caused by the caller rather than by the service itself.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            PostboxError::PasswordHash(_) | PostboxError::Token(_) | PostboxError::Database(_)
        )
    }
}
