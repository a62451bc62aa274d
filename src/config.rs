//! Configuration management for the account-auth service
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! Settings are loaded once at startup into an immutable struct and injected
//! into the components that need them. Business logic never reads the
//! environment directly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub server: ServerSettings,
}

impl Settings {
    /// Load settings from environment variables (and .env in debug builds).
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("Loaded .env file for development");
        }

        Ok(Settings {
            database: DatabaseSettings::from_env()?,
            auth: AuthSettings::from_env()?,
            server: ServerSettings::from_env()?,
        })
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: u64,
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
            acquire_timeout: env::var("DATABASE_ACQUIRE_TIMEOUT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid DATABASE_ACQUIRE_TIMEOUT")?,
        })
    }
}

/// Token issuance settings
///
/// The signing algorithm is fixed to HS256 in `security::jwt` and is not
/// configurable; only the secret and the TTLs come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

impl AuthSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            // Default: 30 minutes
            access_token_ttl_secs: env::var("ACCESS_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse()
                .context("Invalid ACCESS_TOKEN_TTL_SECS")?,
            // Default: 7 days
            refresh_token_ttl_secs: env::var("REFRESH_TOKEN_TTL_SECS")
                .unwrap_or_else(|_| "604800".to_string())
                .parse()
                .context("Invalid REFRESH_TOKEN_TTL_SECS")?,
        })
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_auth_settings_from_env() {
        env::set_var("JWT_SECRET", "test-secret-key");
        env::set_var("ACCESS_TOKEN_TTL_SECS", "900");

        let settings = AuthSettings::from_env().unwrap();

        assert_eq!(settings.jwt_secret, "test-secret-key");
        assert_eq!(settings.access_token_ttl_secs, 900);
        assert_eq!(settings.refresh_token_ttl_secs, 604800); // Default

        env::remove_var("JWT_SECRET");
        env::remove_var("ACCESS_TOKEN_TTL_SECS");
    }

    #[test]
    #[serial]
    fn test_auth_settings_require_secret() {
        env::remove_var("JWT_SECRET");
        assert!(AuthSettings::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_database_settings_from_env() {
        env::set_var("DATABASE_URL", "postgres://localhost/test");
        env::set_var("DATABASE_MAX_CONNECTIONS", "50");

        let settings = DatabaseSettings::from_env().unwrap();

        assert_eq!(settings.url, "postgres://localhost/test");
        assert_eq!(settings.max_connections, 50);
        assert_eq!(settings.acquire_timeout, 5); // Default

        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
    }

    #[test]
    #[serial]
    fn test_server_settings_defaults() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let settings = ServerSettings::from_env().unwrap();

        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8000);
    }
}
