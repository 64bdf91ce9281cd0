// src/config.rs

//! Defines the configuration structures for `rawedit`.
//!
//! Settings are read from a JSON file named by the `RAWEDIT_CONFIG`
//! environment variable. Every section falls back to its defaults when a field
//! is missing, so an empty object (or no file at all) is a valid configuration.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "RAWEDIT_CONFIG";
/// Environment variable naming the log file; overrides `logging.file`.
pub const LOG_FILE_ENV_VAR: &str = "RAWEDIT_LOG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for the editor.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Input and terminal-device settings.
    pub input: InputConfig,
    /// Screen drawing settings.
    pub display: DisplayConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads and parses the configuration file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `RAWEDIT_CONFIG`, or the defaults when the
    /// variable is unset or the file is unusable.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) else {
            return Config::default();
        };
        match Config::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{:#}. Using default configuration.", e);
                Config::default()
            }
        }
    }

    /// The log file to write to, giving `RAWEDIT_LOG` precedence.
    pub fn log_file(&self) -> Option<PathBuf> {
        std::env::var_os(LOG_FILE_ENV_VAR)
            .map(PathBuf::from)
            .or_else(|| self.logging.file.clone())
    }
}

// --- Input Configuration ---

/// Settings for reading from the terminal device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// How long a single read waits for a byte before timing out.
    /// Rounded to deciseconds when applied to the terminal (`VTIME`).
    pub read_timeout_ms: u64,
    /// Maximum number of reply bytes read while probing the window size.
    pub size_probe_budget: usize,
    /// Letter that, combined with Ctrl, quits the editor.
    pub quit_key: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            read_timeout_ms: 100,
            size_probe_budget: 32,
            quit_key: 'q',
        }
    }
}

impl InputConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// The control byte produced by Ctrl plus `quit_key`.
    pub fn quit_byte(&self) -> u8 {
        ctrl_key(self.quit_key)
    }
}

/// Maps a letter to the byte the terminal sends for Ctrl plus that letter.
pub fn ctrl_key(letter: char) -> u8 {
    (letter as u32 & 0x1f) as u8
}

// --- Display Configuration ---

/// Settings for the screen renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Drawn at the start of screen rows past the end of the buffer.
    pub placeholder: String,
    /// Centered banner shown when no file is open.
    pub welcome_message: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            placeholder: "~".to_string(),
            welcome_message: format!("rawedit -- version {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// --- Logging Configuration ---

/// Where and how verbosely to log. The terminal owns stderr while the editor
/// runs, so logging is off unless a file is given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}
