//! Storage layer
//!
//! Uses SQLite (embedded) for users and posts.
//! Uses moka (in-memory) for the per-user post cache.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::PostCache;
