//! Server configuration
//!
//! Built-in defaults overridden by `POSTBOX_*` environment variables, e.g.
//! `POSTBOX_JWT_SECRET` or `POSTBOX_CACHE_TTL_SECS`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

pub const ENV_PREFIX: &str = "POSTBOX";
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
/// Upper bound for both TTLs: ten years.
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .set_default("bind_address", "127.0.0.1:8000")?
            .set_default("database_path", "./data/postbox.db")?
            .set_default("database_max_connections", 5_i64)?
            .set_default("jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("token_ttl_secs", 3600_i64)?
            .set_default("cache_ttl_secs", 300_i64)?
            .set_default("cache_capacity", 100_i64)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("database_max_connections", self.database_max_connections as u64),
            ("token_ttl_secs", self.token_ttl_secs),
            ("cache_ttl_secs", self.cache_ttl_secs),
            ("cache_capacity", self.cache_capacity as u64),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Message(format!("{key} must be greater than zero")));
            }
        }
        for (key, value) in [
            ("token_ttl_secs", self.token_ttl_secs),
            ("cache_ttl_secs", self.cache_ttl_secs),
        ] {
            if value > MAX_TTL_SECS {
                return Err(ConfigError::Message(format!(
                    "{key} must be at most {MAX_TTL_SECS}"
                )));
            }
        }
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Message("jwt_secret must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}
