//! Configuration types for lintmsg.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::environment::{self, EnvSnapshot};
use crate::types::RenderMode;

/// Render configuration for a single call.
///
/// This is the explicit form of the process-wide state: pass one to
/// [`crate::Renderer`] to render without consulting globals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Output shape.
    pub mode: RenderMode,
    /// Whether structured payloads use short field names.
    pub compression: bool,
}

impl RenderConfig {
    /// Creates a configuration with compression off.
    #[must_use]
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            compression: false,
        }
    }

    /// Sets compression.
    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compression = enabled;
        self
    }

    /// Builds the auto-detected configuration for an environment.
    #[must_use]
    pub fn detect(env: &EnvSnapshot) -> Self {
        Self::new(environment::detect(env).mode)
    }

    /// Resolves the configuration for a run with explicit settings.
    ///
    /// `fallback_compression` is used when the settings leave compression
    /// unset.
    #[must_use]
    pub fn from_settings(
        env: &EnvSnapshot,
        settings: &MessagingSettings,
        fallback_compression: bool,
    ) -> Self {
        Self {
            mode: environment::detect_with_settings(env, settings).mode,
            compression: settings.compression.unwrap_or(fallback_compression),
        }
    }
}

/// Per-run messaging settings, as found in the `[messaging]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingSettings {
    /// Explicit mode; beaten only by the `LINTMSG_MODE` variable.
    #[serde(default, deserialize_with = "deserialize_mode")]
    pub mode: Option<RenderMode>,

    /// Compression override.
    #[serde(default)]
    pub compression: Option<bool>,

    /// Whether to consult the known-agent table.
    #[serde(default)]
    pub auto_agent_detection: bool,
}

/// Accepts mode names and legacy aliases in config files.
fn deserialize_mode<'de, D>(deserializer: D) -> Result<Option<RenderMode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| raw.parse().map_err(serde::de::Error::custom))
        .transpose()
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Messaging settings.
    #[serde(default)]
    pub messaging: MessagingSettings,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names an unknown mode.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
