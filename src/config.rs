use std::net::SocketAddr;
use thiserror::Error;
use tracing::Level;

use crate::domain::agent::IdleSelection;
use crate::domain::task::SkillCatalog;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Runtime configuration read from environment variables
///
/// # Variables
/// - `BIND_ADDR` - Socket address to listen on (default `0.0.0.0:8080`)
/// - `SKILLS` - Comma-separated skill catalog (default `skill1,skill2,skill3`)
/// - `IDLE_SELECTION` - `first` or `random` (default `first`)
/// - `LOG_LEVEL` - `trace`, `debug`, `info`, `warn` or `error` (default `info`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub skills: SkillCatalog,
    pub idle_selection: IdleSelection,
    pub log_level: Level,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup
    ///
    /// Each unset key falls back to its default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "BIND_ADDR",
                    reason: e.to_string(),
                })?,
            None => {
                let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
                tracing::warn!("BIND_ADDR not set, using default {}", addr);
                addr
            }
        };

        let skills = match lookup("SKILLS") {
            Some(raw) => SkillCatalog::new(raw.split(',')).map_err(|e| ConfigError::InvalidValue {
                key: "SKILLS",
                reason: e.to_string(),
            })?,
            None => {
                tracing::warn!("SKILLS not set, using default skill1,skill2,skill3");
                SkillCatalog::default()
            }
        };

        let idle_selection = match lookup("IDLE_SELECTION") {
            Some(raw) => raw
                .parse::<IdleSelection>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "IDLE_SELECTION",
                    reason: e.to_string(),
                })?,
            None => {
                let selection = IdleSelection::default();
                tracing::warn!("IDLE_SELECTION not set, using default {}", selection);
                selection
            }
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(raw) => raw.trim().parse::<Level>().map_err(|_| ConfigError::InvalidValue {
                key: "LOG_LEVEL",
                reason: format!("unknown level '{}'", raw),
            })?,
            None => {
                tracing::warn!("LOG_LEVEL not set, using default {}", Level::INFO);
                Level::INFO
            }
        };

        Ok(Self {
            bind_addr,
            skills,
            idle_selection,
            log_level,
        })
    }
}
