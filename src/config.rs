//! Configuration file handling.
//!
//! Defaults for flags you would otherwise repeat on every invocation,
//! loaded from a TOML file at `~/.config/osaudit/config.toml` (platform
//! equivalent elsewhere). Command-line flags always win over the file.
//!
//! # Example Configuration
//!
//! ```toml
//! default_format = "text"
//! loud = false
//! no_color = false
//! cache_ttl_hours = 12
//! username = "someone@example.com"
//! token = "oss-index-api-token"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "text", "json", "csv"
    pub default_format: String,

    /// Include non-vulnerable packages in output by default.
    pub loud: bool,

    /// Strip ANSI colors from text output by default.
    pub no_color: bool,

    /// How long to cache vulnerability reports, in hours.
    pub cache_ttl_hours: u64,

    /// OSS Index username. Anonymous use works but is rate-limited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// OSS Index API token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            loud: false,
            no_color: false,
            cache_ttl_hours: 12,
            username: None,
            token: None,
        }
    }
}

impl Config {
    /// Loads configuration from the config file, or defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration, creating the parent directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("osaudit")
            .join("config.toml")
    }
}
