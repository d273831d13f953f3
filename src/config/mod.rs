//! Configuration management
//!
//! This module provides YAML-based configuration management with support for:
//! - Environment variable overrides
//! - Multiple configuration file locations
//! - Default values for all settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Permission repository backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the permission repository API
    pub url: String,

    /// Per-request timeout applied by the HTTP client
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// How long the permission cache waits for a resolved-permissions
    /// response before giving up and continuing unrestricted
    #[serde(default = "default_permission_timeout")]
    pub permission_timeout_secs: u64,
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn permission_timeout(&self) -> Duration {
        Duration::from_secs(self.permission_timeout_secs)
    }
}

/// Logging configuration, consumed by the host shell when it installs its
/// tracing subscriber
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_permission_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                url: "http://127.0.0.1:5080/api/v1".to_string(),
                request_timeout_secs: default_request_timeout(),
                permission_timeout_secs: default_permission_timeout(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl AccessConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file (YAML)
    /// 3. Environment variables (prefixed with CAREBRIDGE_)
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let config_path = std::env::var("CAREBRIDGE_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(Self::find_config_file);

        let mut config = if let Some(ref path) = config_path {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_norway::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            } else {
                AccessConfig::default()
            }
        } else {
            AccessConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            PathBuf::from("access.yaml"),
            PathBuf::from("config/access.yaml"),
            PathBuf::from("/etc/carebridge/access.yaml"),
            dirs::config_dir()
                .map(|p| p.join("carebridge/access.yaml"))
                .unwrap_or_default(),
        ];

        paths.into_iter().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CAREBRIDGE_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(secs) = std::env::var("CAREBRIDGE_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.backend.request_timeout_secs = s;
            }
        }
        if let Ok(secs) = std::env::var("CAREBRIDGE_PERMISSION_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.backend.permission_timeout_secs = s;
            }
        }
        if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CAREBRIDGE_LOG_FORMAT") {
            self.logging.format = match format.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Pretty,
            };
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.backend.url.is_empty() {
            anyhow::bail!("backend.url must not be empty");
        }
        if !self.backend.url.starts_with("http://") && !self.backend.url.starts_with("https://") {
            anyhow::bail!("backend.url must be an http(s) URL: {}", self.backend.url);
        }
        if self.backend.permission_timeout_secs == 0 {
            anyhow::bail!("backend.permission_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
