// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://trailbook.db";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:8081";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_PORT: u16 = 8080;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL (`sqlite://path.db` or `sqlite::memory:`)
    pub database_url: String,
    /// Connection pool size
    pub database_max_connections: u32,
    /// Client origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
        })
    }

    /// Config for tests: private in-memory database.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Read an optional numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "sqlite://test-hikes.db");
        env::set_var("PORT", "9090");
        env::remove_var("DATABASE_MAX_CONNECTIONS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.database_url, "sqlite://test-hikes.db");
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_max_connections, DEFAULT_MAX_CONNECTIONS);

        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");
    }
}
