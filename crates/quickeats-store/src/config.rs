//! Store configuration.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_BACKEND: &str = "QUICKEATS_BACKEND";
pub const ENV_DATABASE_PATH: &str = "QUICKEATS_DATABASE_PATH";
pub const ENV_CHANNEL_BUFFER: &str = "QUICKEATS_CHANNEL_BUFFER";
pub const ENV_ENFORCE_REFERENCES: &str = "QUICKEATS_ENFORCE_REFERENCES";
pub const ENV_SEED_ON_STARTUP: &str = "QUICKEATS_SEED_ON_STARTUP";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown storage backend '{0}' (expected memory or sqlite)")]
    UnknownBackend(String),
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which storage variant serves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Process-local actors; state is lost on exit.
    #[default]
    Memory,
    /// SQLite file; state survives restarts.
    Sqlite,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Memory => "memory",
            BackendKind::Sqlite => "sqlite",
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "transient" => Ok(BackendKind::Memory),
            "sqlite" | "durable" => Ok(BackendKind::Sqlite),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// Database file for the sqlite backend.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Request queue capacity of each entity actor in the memory backend.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
    /// Reject orders and menu items whose restaurant does not exist.
    #[serde(default)]
    pub enforce_references: bool,
    /// Run `setup_db` when the binary starts.
    #[serde(default = "default_seed_on_startup")]
    pub seed_on_startup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            database_path: default_database_path(),
            channel_buffer: default_channel_buffer(),
            enforce_references: false,
            seed_on_startup: default_seed_on_startup(),
        }
    }
}

impl StoreConfig {
    /// Defaults overlaid with the `QUICKEATS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each `QUICKEATS_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BACKEND) {
            config.backend = value.parse()?;
        }
        if let Some(value) = lookup(ENV_DATABASE_PATH) {
            config.database_path = value;
        }
        if let Some(value) = lookup(ENV_CHANNEL_BUFFER) {
            config.channel_buffer = parse_value(ENV_CHANNEL_BUFFER, &value)?;
            if config.channel_buffer == 0 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_CHANNEL_BUFFER,
                    value,
                });
            }
        }
        if let Some(value) = lookup(ENV_ENFORCE_REFERENCES) {
            config.enforce_references = parse_flag(ENV_ENFORCE_REFERENCES, &value)?;
        }
        if let Some(value) = lookup(ENV_SEED_ON_STARTUP) {
            config.seed_on_startup = parse_flag(ENV_SEED_ON_STARTUP, &value)?;
        }

        Ok(config)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

fn default_database_path() -> String {
    "./data/quickeats.db".to_string()
}

const fn default_channel_buffer() -> usize {
    32
}

const fn default_seed_on_startup() -> bool {
    true
}
