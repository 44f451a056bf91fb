use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "brokerctl.toml";
pub const DEFAULT_PORT: u16 = 4444;

/// Top-level configuration, read from `brokerctl.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlConfig {
    pub server: ServerSettings,
    pub docker: DockerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DockerSettings {
    /// Unix socket path; unset means DOCKER_HOST or the platform default
    pub socket: Option<String>,
    /// Grace period passed to stop; unset leaves it to the daemon
    pub stop_timeout_secs: Option<i64>,
    /// Client deadline for listing and pinging; stop and start are unbounded
    pub request_timeout_secs: u64,
}

impl Default for DockerSettings {
    fn default() -> Self {
        Self {
            socket: None,
            stop_timeout_secs: None,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
    /// Directory for daily-rolling log files; unset logs to stdout only
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl ControlConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config
    /// directory is tried and defaults are used if nothing is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let config: ControlConfig =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidFormat {
                reason: e.to_string(),
            })?;

        config.validate()?;
        info!("📄 Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// `<config_dir>/brokerctl/brokerctl.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("brokerctl").join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.bind_address".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "must be between 1 and 65535".to_string(),
            }
            .into());
        }

        if self.docker.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "docker.request_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        if let Some(t) = self.docker.stop_timeout_secs {
            if t < 0 {
                return Err(ConfigError::InvalidValue {
                    field: "docker.stop_timeout_secs".to_string(),
                    reason: "must not be negative".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
