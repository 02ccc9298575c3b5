//! HTTP handlers

pub mod auth;
pub mod health;
pub mod posts;

pub use health::health;
