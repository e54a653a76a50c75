//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors_origins: Vec<String>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server and Database Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://books.db".to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::MissingVar("DATABASE_URL".to_string()));
        }

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "DB_MAX_CONNECTIONS".to_string(),
                        format!("'{}' is not a positive integer", raw),
                    ))
                }
            },
            None => 5,
        };

        // --- Load CORS Allow-List ---
        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();
        for origin in &cors_origins {
            origin.parse::<HeaderValue>().map_err(|_| {
                ConfigError::InvalidValue(
                    "CORS_ORIGINS".to_string(),
                    format!("'{}' is not a valid origin", origin),
                )
            })?;
        }

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            database_url,
            db_max_connections,
            cors_origins,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite://books.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.cors_origins, vec!["http://127.0.0.1:8000".to_string()]);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, https://shop.example.com,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://shop.example.com".to_string()
            ]
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("BIND_ADDRESS", "not-an-address")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("DB_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "DB_MAX_CONNECTIONS"
        ));
        assert!(matches!(
            load(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "RUST_LOG"
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "  ")]),
            Err(ConfigError::MissingVar(var)) if var == "DATABASE_URL"
        ));
    }
}
