use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{path::Path, str::FromStr};
use thiserror::Error;
use tracing::Level;
use xiaomali_types::{ConfigError, EngineConfig};

/// Configuration file for the shell.
///
/// ```yaml
/// log_level: info
/// engine:
///   starting_balance: 1000
///   base_tick_ms: 100
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Error)]
pub enum ShellConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error(transparent)]
    Engine(#[from] ConfigError),
}

pub struct ValidatedShellConfig {
    pub log_level: Level,
    pub engine: EngineConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("could not parse config file {}", path.display()))
    }

    pub fn validate(self) -> Result<ValidatedShellConfig, ShellConfigError> {
        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ShellConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;
        self.engine.validate()?;
        Ok(ValidatedShellConfig {
            log_level,
            engine: self.engine,
        })
    }
}
