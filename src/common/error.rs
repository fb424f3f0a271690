//! Error types for the speech navigation harness
//!
//! Messages name the failing collaborator and, where there is one, the
//! command that usually fixes it.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the speech navigation harness
#[derive(Error, Debug)]
pub enum Error {
    // === Host/Connection Errors ===
    #[error("Speech host not running. Start it with 'speechnav host' or set host.autostart = true")]
    HostNotRunning,

    #[error("Failed to spawn speech host: timed out waiting for socket after {0} seconds")]
    HostSpawnTimeout(u64),

    #[error("Failed to connect to speech host: {0}")]
    HostConnectionFailed(#[source] io::Error),

    #[error("Speech host communication error: {0}")]
    HostCommunication(String),

    // === Editor Errors ===
    #[error("No text loaded in the editor. Prepare the editor before navigating")]
    EditorNotPrepared,

    // === Key Errors ===
    #[error("Unknown navigation key '{0}'")]
    UnknownKey(String),

    #[error("Invalid key identifier: {0}")]
    InvalidKey(String),

    // === Speech Configuration Errors ===
    #[error("Unknown configuration path '{0}'")]
    InvalidConfigPath(String),

    #[error("Invalid value for '{path}': {reason}")]
    InvalidConfigValue { path: String, reason: String },

    // === Timeout Errors ===
    #[error("No speech received within {0} seconds")]
    SpeechTimeout(u64),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Test Errors ===
    #[error("Test assertion failed: {0}")]
    TestAssertion(String),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_config_value(path: &str, reason: &str) -> Self {
        Self::InvalidConfigValue {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// IPC-serializable error for host responses
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IpcError {
    pub code: String,
    pub message: String,
}

impl From<&Error> for IpcError {
    fn from(e: &Error) -> Self {
        let code = match e {
            Error::EditorNotPrepared => "EDITOR_NOT_PREPARED",
            Error::UnknownKey(_) => "UNKNOWN_KEY",
            Error::InvalidKey(_) => "INVALID_KEY",
            Error::InvalidConfigPath(_) => "INVALID_CONFIG_PATH",
            Error::InvalidConfigValue { .. } => "INVALID_CONFIG_VALUE",
            Error::SpeechTimeout(_) => "TIMEOUT",
            _ => "INTERNAL_ERROR",
        }
        .to_string();

        Self {
            code,
            message: e.to_string(),
        }
    }
}

impl From<IpcError> for Error {
    fn from(e: IpcError) -> Self {
        // Only argument-free variants survive the round trip intact
        match e.code.as_str() {
            "EDITOR_NOT_PREPARED" => Error::EditorNotPrepared,
            "TIMEOUT" => Error::SpeechTimeout(0),
            _ => Error::HostCommunication(e.message),
        }
    }
}
