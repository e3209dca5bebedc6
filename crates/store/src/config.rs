//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BREWLINE_DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `BREWLINE_DB_MAX_CONNECTIONS` - Pool size cap (default: 10)

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present, then the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or an
    /// optional variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present; ignore if missing
        dotenvy::dotenv().ok();

        let database_url = required_env("BREWLINE_DATABASE_URL")?;

        let max_connections = match std::env::var("BREWLINE_DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "BREWLINE_DB_MAX_CONNECTIONS".to_owned(),
                    format!("expected a positive integer, got {raw:?}"),
                )
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: SecretString::from(database_url),
            max_connections,
        })
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}
