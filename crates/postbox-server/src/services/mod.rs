//! Business logic services

pub mod auth;
pub mod posts;

pub use auth::AuthService;
pub use posts::PostService;
