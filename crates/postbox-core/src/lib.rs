//! Postbox Core Library
//!
//! Error taxonomy, storage port, password hashing and input validation for
//! the Postbox service.

// Re-export pure types from postbox-types
pub use postbox_types::*;

pub mod crypto;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{PostboxError, Result};
