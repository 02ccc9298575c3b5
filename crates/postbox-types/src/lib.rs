//! Postbox Types - Pure type definitions
//!
//! Data types shared between the store, the services and the HTTP layer.
//! Nothing in here depends on an async runtime or a database driver.

pub mod post;
pub mod user;

pub use post::*;
pub use user::*;
