//! Chat settings loaded from `config.json`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::XdgDirs;
use crate::chat::{InputLimit, InputLimitPolicy};

/// Longest reply delay accepted from configuration.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// Error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which presentation template renders the chat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Full-screen layout with header, status bar and footer
    #[default]
    FullPage,
    /// Compact bordered card centred in the terminal
    Card,
}

impl LayoutVariant {
    /// Advisory character limit shown in the compose counter
    pub fn default_input_limit(&self) -> usize {
        match self {
            LayoutVariant::FullPage => 1000,
            LayoutVariant::Card => 500,
        }
    }
}

/// User-tunable chat settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutVariant,
    pub reply_delay_ms: u64,
    pub input_limit_policy: InputLimitPolicy,
    /// Overrides the layout's default limit when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutVariant::default(),
            reply_delay_ms: crate::chat::DEFAULT_REPLY_DELAY.as_millis() as u64,
            input_limit_policy: InputLimitPolicy::default(),
            input_limit: None,
        }
    }
}

impl Settings {
    /// Load from the XDG config path, falling back to defaults if absent.
    pub fn load_default() -> Result<Self, SettingsError> {
        Self::load_or_default(&Self::default_config_path())
    }

    /// Load from `path`; a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    /// Load and validate settings from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        tracing::info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save settings to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn default_config_path() -> PathBuf {
        XdgDirs::new().config.join("config.json")
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(SettingsError::Invalid {
                field: "reply_delay_ms",
                reason: format!("must be at most {}", MAX_REPLY_DELAY_MS),
            });
        }
        if self.input_limit == Some(0) {
            return Err(SettingsError::Invalid {
                field: "input_limit",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Effective compose limit for the selected layout.
    pub fn input_limit(&self) -> InputLimit {
        InputLimit {
            max_chars: self
                .input_limit
                .unwrap_or_else(|| self.layout.default_input_limit()),
            policy: self.input_limit_policy,
        }
    }
}
