//! Configuration management for the monitor.
//!
//! Configuration is read from `~/.config/youtube-monitor/config.toml`.
//! A missing file is not an error: it loads as an empty [`Config`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Seconds between two polls when `check_delay` is not configured.
pub const DEFAULT_CHECK_DELAY: u64 = 60 * 10;

/// Contents of the config file. Both keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_delay: Option<u64>,
}

impl Config {
    /// Delay between polls in seconds.
    pub fn check_delay(&self) -> u64 {
        self.check_delay.unwrap_or(DEFAULT_CHECK_DELAY)
    }
}

/// Reads and writes a [`Config`] at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted at [`ConfigStore::default_config_path`].
    pub fn at_default_path() -> Result<Self, ConfigError> {
        Ok(Self::new(Self::default_config_path()?))
    }

    /// Get the default config file path: `~/.config/youtube-monitor/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("youtube-monitor").join("config.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the configuration.
    ///
    /// A missing file yields an empty config. A file that exists but is not
    /// valid TOML is an error.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.exists() {
            tracing::debug!("No config file at {}", self.path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| ConfigError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        if config.check_delay == Some(0) {
            return Err(ConfigError::ZeroCheckDelay {
                path: self.path.clone(),
            });
        }

        tracing::debug!("Config loaded from {}", self.path.display());
        Ok(config)
    }

    /// Overwrite the config file with exactly `channel` and `check_delay`.
    pub fn store(&self, channel: &str, check_delay: u64) -> Result<(), ConfigError> {
        let config = Config {
            channel: Some(channel.to_string()),
            check_delay: Some(check_delay),
        };
        let content = toml::to_string(&config)?;
        tracing::debug!(
            "Writing config to file ({}):\n{}",
            self.path.display(),
            content
        );
        self.write(&content)
    }

    /// Write the commented default config unless a file already exists.
    pub fn ensure_default(&self) -> Result<(), ConfigError> {
        if self.exists() {
            tracing::info!("Config file already exists, skipping");
            return Ok(());
        }
        self.write(&Self::default_config_content())
    }

    fn write(&self, content: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(&self.path).map_err(|e| ConfigError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        file.write_all(content.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        format!(
            r#"# youtube-monitor configuration
#
# Channel to watch, used when --channel is not given:
# channel = "UCxxxxxxxxxxxxxxxxxxxxxx"

# Seconds between two checks of the channel feed (10 min)
check_delay = {}
"#,
            DEFAULT_CHECK_DELAY
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("check_delay in {path} must be at least 1 second")]
    ZeroCheckDelay { path: PathBuf },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
