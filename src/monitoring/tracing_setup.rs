use crate::config::LoggingSettings;
use anyhow::{Result, anyhow};
use std::io;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "brokerctl.log";

/// Logging configuration for the control service
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub log_level: String,
    pub enable_json_logs: bool,
    /// Directory for daily-rolling JSON log files
    pub log_dir: Option<PathBuf>,
}

impl TracingConfig {
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        Self {
            log_level: if verbose {
                "debug".to_string()
            } else {
                settings.level.clone()
            },
            enable_json_logs: settings.json,
            log_dir: settings.file.clone(),
        }
    }

    /// `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes the file writer on drop and must be held
    /// for the life of the process.
    pub fn init_tracing(&self) -> Result<Option<WorkerGuard>> {
        let (file_layer, guard) = match &self.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .json();
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let registry = Registry::default().with(self.env_filter()).with(file_layer);

        let installed = if self.enable_json_logs {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_current_span(true)
                        .with_writer(io::stdout),
                )
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(false).compact())
                .try_init()
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

        Ok(guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug() {
        let settings = LoggingSettings::default();
        assert_eq!(TracingConfig::from_settings(&settings, false).log_level, "info");
        assert_eq!(TracingConfig::from_settings(&settings, true).log_level, "debug");
    }

    #[test]
    fn test_settings_carry_over() {
        let settings = LoggingSettings {
            level: "warn".to_string(),
            json: true,
            file: Some(PathBuf::from("/var/log/brokerctl")),
        };
        let config = TracingConfig::from_settings(&settings, false);
        assert!(config.enable_json_logs);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/brokerctl")));
    }
}
