//! Configuration management for COBA
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{CobaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for COBA
///
/// Holds everything the client needs: where the analysis service lives and
/// how interactive sessions behave.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Analysis service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the analysis service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    ///
    /// The orchestration layer enforces no timeout of its own; this is the
    /// transport client's policy.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Default feature for `coba chat` when none is given on the CLI
    #[serde(default = "default_chat_feature")]
    pub default_feature: String,
}

fn default_chat_feature() -> String {
    "chat".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_feature: default_chat_feature(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// Precedence, lowest to highest: file values, `COBA_*` environment
    /// variables, CLI flags. A missing file falls back to defaults with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CobaError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CobaError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("COBA_BASE_URL") {
            self.service.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("COBA_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse() {
                self.service.timeout_seconds = seconds;
            } else {
                tracing::warn!("Ignoring non-numeric COBA_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(feature) = std::env::var("COBA_CHAT_FEATURE") {
            self.chat.default_feature = feature;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.base_url {
            self.service.base_url = base_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `Config` errors for an unparseable base URL, a zero timeout,
    /// or a default chat feature that is unknown or not a conversation.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.service.base_url).map_err(|e| {
            CobaError::Config(format!(
                "Invalid service base URL '{}': {}",
                self.service.base_url, e
            ))
        })?;

        if self.service.timeout_seconds == 0 {
            return Err(CobaError::Config("timeout_seconds must be non-zero".to_string()).into());
        }

        // `coba chat` would reject a single-shot feature anyway; catching it
        // here points at the config value instead of failing at session start.
        let feature = crate::feature::Feature::parse_str(&self.chat.default_feature)
            .map_err(CobaError::Config)?;
        if feature.profile().mode != crate::feature::SessionMode::Transcript {
            return Err(CobaError::Config(format!(
                "default_feature '{}' is single-shot; use chat or code-generation",
                feature
            ))
            .into());
        }

        Ok(())
    }
}
