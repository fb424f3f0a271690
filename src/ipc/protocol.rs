//! IPC protocol message types
//!
//! Defines the request/response format for CLI ↔ speech host communication.
//! Uses a simple length-prefixed JSON protocol.

use serde::{Deserialize, Serialize};

use crate::common::error::IpcError;
use crate::speech::{NavKey, Utterance};

/// IPC request from CLI to host
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    /// Request ID for matching responses
    pub id: u64,
    /// The command to execute
    pub command: Command,
}

/// IPC response from host to CLI
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    /// Request ID this response corresponds to
    pub id: u64,
    /// Whether the command succeeded
    pub success: bool,
    /// Result data on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Error information on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<IpcError>,
}

impl Response {
    /// Create a success response
    pub fn success(id: u64, result: serde_json::Value) -> Self {
        Self {
            id,
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: u64, error: IpcError) -> Self {
        Self {
            id,
            success: false,
            result: None,
            error: Some(error),
        }
    }

    /// Create a success response with no data
    pub fn ok(id: u64) -> Self {
        Self::success(id, serde_json::json!({}))
    }
}

/// Commands that can be sent from CLI to host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Load text into a fresh editor, caret at the start
    PrepareEditor { text: String },

    /// Set one speech configuration value
    SetConfigValue {
        path: Vec<String>,
        value: serde_json::Value,
    },

    /// Restore the host's initial speech configuration
    ResetConfig,

    /// Press a key and return the speech it produced
    SpeechAfterKey { key: NavKey },

    /// Get host status
    Status,

    /// Shut the host down
    Shutdown,
}

/// Result of a `SpeechAfterKey` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechResult {
    pub speech: Utterance,
}

/// Result of a `Status` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    /// Name of the backend producing speech
    pub backend: String,
    /// Host version
    pub version: String,
    /// Whether text has been loaded into the editor
    pub editor_prepared: bool,
    /// Length of the loaded text in characters
    pub text_chars: usize,
    /// Caret position in characters
    pub caret: usize,
    /// Current value of the speak-all-symbols-by-word flag
    pub symbol_level_word_all: bool,
}
