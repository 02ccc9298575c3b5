//! Postbox Server
//!
//! Users sign up and log in to get a session token, then create, list and
//! delete short text posts with it.
//!
//! # Architecture
//!
//! - **storage**: SQLite-backed [`Database`] and the per-user [`PostCache`]
//! - **services**: token issuing/verification and cached post access
//! - **extractors**: resolves the `token` query parameter to a user
//! - **handlers**: one function per endpoint

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod services;
pub mod storage;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use postbox_core::ports::CredentialStore;
use std::sync::Arc;

pub use self::config::ServerConfig;
pub use self::error::ApiError;
use self::services::{AuthService, PostService};
pub use self::storage::{Database, PostCache};

/// Large enough for a maximal post even when every character arrives as a
/// 12-byte `\uXXXX\uXXXX` surrogate pair escape, plus JSON framing.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const _: () = assert!(MAX_BODY_BYTES >= 12 * postbox_core::MAX_POST_CHARS + 64);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<PostCache>,
    pub auth_service: Arc<AuthService>,
    pub post_service: Arc<PostService>,
}

impl AppState {
    pub fn new(store: Arc<dyn CredentialStore>, config: &ServerConfig) -> Self {
        let cache = Arc::new(PostCache::new(config.cache_capacity, config.cache_ttl()));
        let auth_service = Arc::new(AuthService::new(
            store.clone(),
            &config.jwt_secret,
            config.token_ttl(),
        ));
        let post_service = Arc::new(PostService::new(store, cache.clone()));

        Self {
            cache,
            auth_service,
            post_service,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/addpost", post(handlers::posts::add_post))
        .route("/getposts", get(handlers::posts::get_posts))
        .route("/deletepost", delete(handlers::posts::delete_post))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
