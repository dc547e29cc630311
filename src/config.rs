//! Service configuration loaded from environment variables.

use std::time::Duration;

use crate::debounce::{LIST_RELOAD_DELAY, PRICE_RECOMPUTE_DELAY};

/// Runtime configuration.
///
/// | Env Var                    | Default     |
/// |----------------------------|-------------|
/// | `HOST`                     | `0.0.0.0`   |
/// | `PORT`                     | `8080`      |
/// | `DATABASE_URL`             | (required)  |
/// | `DATABASE_MAX_CONNECTIONS` | `5`         |
/// | `CURRENCY`                 | `EUR`       |
/// | `PRICE_DEBOUNCE_MS`        | `100`       |
/// | `LIST_DEBOUNCE_MS`         | `150`       |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub currency: String,
    pub price_debounce: Duration,
    pub list_debounce: Duration,
}

/// A configuration value that could not be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |name: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(name) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid { name, value }),
                None => Ok(default),
            }
        };

        let port = parsed("PORT", 8080)?;
        let port = u16::try_from(port).map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port.to_string(),
        })?;

        let database_max_connections = parsed("DATABASE_MAX_CONNECTIONS", 5)?;
        let database_max_connections =
            u32::try_from(database_max_connections).map_err(|_| ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: database_max_connections.to_string(),
            })?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections,
            currency: lookup("CURRENCY")
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "EUR".to_string()),
            price_debounce: Duration::from_millis(parsed(
                "PRICE_DEBOUNCE_MS",
                PRICE_RECOMPUTE_DELAY.as_millis() as u64,
            )?),
            list_debounce: Duration::from_millis(parsed(
                "LIST_DEBOUNCE_MS",
                LIST_RELOAD_DELAY.as_millis() as u64,
            )?),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
