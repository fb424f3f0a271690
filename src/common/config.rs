//! Configuration file handling

use serde::Deserialize;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Speech host settings
    #[serde(default)]
    pub host: HostConfig,

    /// Speech settings the host starts with and resets to
    #[serde(default)]
    pub speech: SpeechDefaults,
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// How long to wait for the speech produced by one key press
    #[serde(default = "default_speech")]
    pub speech_secs: u64,

    /// How long to wait for a spawned host to accept connections
    #[serde(default = "default_connect")]
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            speech_secs: default_speech(),
            connect_secs: default_connect(),
        }
    }
}

fn default_speech() -> u64 {
    10
}
fn default_connect() -> u64 {
    5
}

/// Speech host configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HostConfig {
    /// Auto-exit after this many minutes without a client
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,

    /// Spawn the host automatically when a command needs it
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            idle_timeout_minutes: default_idle_timeout(),
            autostart: default_autostart(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    30
}

fn default_autostart() -> bool {
    true
}

/// Initial speech settings of the host
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpeechDefaults {
    /// Speak every symbol when moving by word
    #[serde(default)]
    pub symbol_level_word_all: bool,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return Self::from_toml(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}
