//! Password hashing with salted argon2

mod password;

pub use password::{hash_password, verify_password};
