//! Backend seam of the speech host
//!
//! The server loop and protocol handling are independent of how speech is
//! produced. A backend owns the editor and the speech configuration.

use serde_json::Value;

use crate::common::{config::SpeechDefaults, Error, Result};
use crate::ipc::protocol::StatusResult;
use crate::speech::{NavKey, Utterance, SYMBOL_LEVEL_WORD_ALL};

/// Producer of speech for key presses in an editor
pub trait SpeechBackend: Send {
    /// Short name reported in status output
    fn name(&self) -> &'static str;

    fn prepare_editor(&mut self, text: &str) -> Result<()>;

    fn set_config_value(&mut self, path: &[String], value: &Value) -> Result<()>;

    fn reset_config(&mut self);

    fn speech_after_key(&mut self, key: &NavKey) -> Result<Utterance>;

    fn status(&self) -> StatusResult;
}

/// Speech settings a backend can change at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeechConfig {
    pub symbol_level_word_all: bool,
}

impl From<SpeechDefaults> for SpeechConfig {
    fn from(defaults: SpeechDefaults) -> Self {
        Self {
            symbol_level_word_all: defaults.symbol_level_word_all,
        }
    }
}

impl SpeechConfig {
    /// Apply one config-path/value pair
    pub fn set(&mut self, path: &[String], value: &Value) -> Result<()> {
        let joined = path.join(".");

        if path.iter().map(String::as_str).eq(SYMBOL_LEVEL_WORD_ALL.iter().copied()) {
            self.symbol_level_word_all = value
                .as_bool()
                .ok_or_else(|| Error::invalid_config_value(&joined, "expected a boolean"))?;
            return Ok(());
        }

        Err(Error::InvalidConfigPath(joined))
    }
}
