//! Collaborators a navigation scenario drives
//!
//! A speech host owns the editor under test, the speech configuration and
//! the key-to-speech pipeline. `HostClient` reaches a host process over IPC;
//! `LocalHost` wraps a backend in-process.

use async_trait::async_trait;
use serde_json::Value;

use crate::common::Result;

use super::keys::NavKey;
use super::utterance::Utterance;

/// Loads text into a fresh editor with the caret at the start
#[async_trait]
pub trait EditorSetup: Send {
    async fn prepare_editor(&mut self, text: &str) -> Result<()>;
}

/// Mutates the host's speech configuration
#[async_trait]
pub trait SpeechConfigurator: Send {
    async fn set_config_value(&mut self, path: &[&str], value: Value) -> Result<()>;

    /// Restore the host's initial configuration
    async fn reset_config(&mut self) -> Result<()>;
}

/// Presses a key and waits for the speech it produces
#[async_trait]
pub trait KeySpeech: Send {
    async fn speech_after_key(&mut self, key: &NavKey) -> Result<Utterance>;
}

/// Everything a scenario needs from a host
pub trait SpeechHost: EditorSetup + SpeechConfigurator + KeySpeech {}

impl<T> SpeechHost for T where T: EditorSetup + SpeechConfigurator + KeySpeech {}
