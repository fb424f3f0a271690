//! In-process speech host
//!
//! Drives a backend directly, without a socket. Used by `--local` runs and
//! by tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::common::Result;
use crate::speech::{EditorSetup, KeySpeech, NavKey, SpeechConfigurator, Utterance};

use super::backend::SpeechBackend;

pub struct LocalHost<B> {
    backend: B,
}

impl<B: SpeechBackend> LocalHost<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: SpeechBackend> EditorSetup for LocalHost<B> {
    async fn prepare_editor(&mut self, text: &str) -> Result<()> {
        self.backend.prepare_editor(text)
    }
}

#[async_trait]
impl<B: SpeechBackend> SpeechConfigurator for LocalHost<B> {
    async fn set_config_value(&mut self, path: &[&str], value: Value) -> Result<()> {
        let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        self.backend.set_config_value(&path, &value)
    }

    async fn reset_config(&mut self) -> Result<()> {
        self.backend.reset_config();
        Ok(())
    }
}

#[async_trait]
impl<B: SpeechBackend> KeySpeech for LocalHost<B> {
    async fn speech_after_key(&mut self, key: &NavKey) -> Result<Utterance> {
        self.backend.speech_after_key(key)
    }
}
