//! Runtime configuration.
//!
//! Values come from `SCHOOLS_*` environment variables, falling back to
//! defaults suitable for running locally:
//!
//! | Variable             | Default          |
//! |----------------------|------------------|
//! | `SCHOOLS_HOST`       | `127.0.0.1`      |
//! | `SCHOOLS_PORT`       | `8080`           |
//! | `SCHOOLS_DATABASE`   | `schools.sqlite` |
//! | `SCHOOLS_JSON_LIMIT` | `1048576` (bytes)|

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const HOST: &str = "SCHOOLS_HOST";
const PORT: &str = "SCHOOLS_PORT";
const DATABASE: &str = "SCHOOLS_DATABASE";
const JSON_LIMIT: &str = "SCHOOLS_JSON_LIMIT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Largest JSON request body accepted, in bytes.
    pub json_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("schools.sqlite"),
            json_limit: 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT) {
            config.port = parse(PORT, port)?;
        }
        if let Some(path) = lookup(DATABASE) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(limit) = lookup(JSON_LIMIT) {
            config.json_limit = parse(JSON_LIMIT, limit)?;
        }
        Ok(config)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|err: T::Err| ConfigError::InvalidValue {
            key,
            message: err.to_string(),
            value,
        })
}
