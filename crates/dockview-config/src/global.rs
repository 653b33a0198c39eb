//! Global configuration for dockview
//!
//! Located at `~/.config/dockview/config.toml`

use crate::{ConfigError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Docker Engine address used when none is configured
pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:2375";

/// Engine API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "v1.47";

/// Global dockview configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub connection: ConnectionSettings,
}

/// Where the Docker Engine lives and which API version to speak
///
/// Values are stored as the user typed them. Validation happens when the
/// engine client resolves its base URL, which falls back to the defaults
/// for anything it cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Engine base URL, e.g. `http://127.0.0.1:2375`
    #[serde(rename = "dockerEngineServer")]
    pub engine_url: String,
    /// API version path segment, e.g. `v1.47`
    #[serde(rename = "dockerApiVersion")]
    pub api_version: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ConnectionSettings {
    pub fn new(engine_url: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            engine_url: engine_url.into(),
            api_version: api_version.into(),
        }
    }

    /// Replace the values that were provided, keep the rest
    pub fn apply(&mut self, engine_url: Option<&str>, api_version: Option<&str>) {
        if let Some(url) = engine_url {
            self.engine_url = url.to_string();
        }
        if let Some(version) = api_version {
            self.api_version = version.to_string();
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from the default path
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load global configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(
            "Loaded config from {:?}: engine={} api={}",
            path,
            config.connection.engine_url,
            config.connection.api_version
        );

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: path.clone(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "dockview").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
