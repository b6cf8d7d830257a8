//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Variable          | Default                   |
//! |-------------------|---------------------------|
//! | `DATABASE_URL`    | `sqlite:data/accounts.db` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000`   |
//! | `BIND_ADDRESS`    | `127.0.0.1:8080`          |
//! | `MIGRATIONS_PATH` | `migrations`              |
//!
//! `ALLOWED_ORIGINS` is a comma-separated list of origins permitted by CORS.

use std::net::SocketAddr;

use lib_utils::envs::{self, get_env_list, get_env_or, get_env_parse};

use crate::error::{AppError, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/accounts.db";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_MIGRATIONS_PATH: &str = "migrations";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,

    /// Address the HTTP server listens on
    pub bind_address: SocketAddr,

    /// Directory holding the SQL migrations applied at startup
    pub migrations_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            bind_address: default_bind_address(),
            migrations_path: DEFAULT_MIGRATIONS_PATH.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults; a set but unparsable
    /// `BIND_ADDRESS` is an error.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let allowed_origins = get_env_list("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]);

        let bind_address = match get_env_parse::<SocketAddr>("BIND_ADDRESS") {
            Ok(addr) => addr,
            Err(envs::Error::MissingEnv(_)) => default_bind_address(),
            Err(e) => return Err(e.into()),
        };

        let migrations_path = get_env_or("MIGRATIONS_PATH", DEFAULT_MIGRATIONS_PATH);

        Ok(Self {
            database_url,
            allowed_origins,
            bind_address,
            migrations_path,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(AppError::Config("DATABASE_URL cannot be empty".to_string()));
        }

        if self.allowed_origins.is_empty() {
            return Err(AppError::Config(
                "ALLOWED_ORIGINS must list at least one origin".to_string(),
            ));
        }

        if let Some(origin) = self
            .allowed_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(AppError::Config(format!(
                "Allowed origin must start with http:// or https://: {}",
                origin
            )));
        }

        Ok(())
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 4] = [
        "DATABASE_URL",
        "ALLOWED_ORIGINS",
        "BIND_ADDRESS",
        "MIGRATIONS_PATH",
    ];

    fn clear_vars() {
        for name in VARS {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_when_unset() {
        clear_vars();

        let config = Config::from_env().expect("Defaults should load");

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.allowed_origins, vec![DEFAULT_ALLOWED_ORIGIN.to_string()]);
        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(config.migrations_path, DEFAULT_MIGRATIONS_PATH);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_values() {
        clear_vars();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var(
            "ALLOWED_ORIGINS",
            " https://app.example.com , http://localhost:5173 ,",
        );
        env::set_var("BIND_ADDRESS", "0.0.0.0:9000");
        env::set_var("MIGRATIONS_PATH", "db/migrations");

        let config = Config::from_env();
        clear_vars();
        let config = config.expect("Configured values should load");

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(
            config.allowed_origins,
            vec![
                "https://app.example.com".to_string(),
                "http://localhost:5173".to_string()
            ]
        );
        assert_eq!(config.bind_address, SocketAddr::from(([0, 0, 0, 0], 9000)));
        assert_eq!(config.migrations_path, "db/migrations");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_bind_address() {
        clear_vars();
        env::set_var("BIND_ADDRESS", "garbage");

        let result = Config::from_env();
        clear_vars();

        let err = result.expect_err("Unparsable bind address should fail");
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("BIND_ADDRESS"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn test_empty_origins_rejected() {
        let config = Config {
            allowed_origins: vec![],
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_origin_without_scheme_rejected() {
        let config = Config {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "localhost:3001".to_string(),
            ],
            ..Config::default()
        };

        let err = config.validate().expect_err("Origin without scheme should fail");
        assert!(err.to_string().contains("localhost:3001"));
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let config = Config {
            database_url: "  ".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }
}
