//! Navigation scenario configuration types
//!
//! Defines the data structures for deserializing YAML scenarios.

use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};
use crate::speech::{Granularity, NavKey, Utterance, SYMBOL_LEVEL_WORD_ALL};

/// A complete navigation scenario loaded from YAML
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct TestScenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario verifies
    pub description: Option<String>,
    /// Why the scenario is switched off; its fixture is kept unchanged
    pub disabled: Option<String>,
    /// Speech settings applied after the host configuration is reset
    #[serde(default)]
    pub settings: SpeechSettings,
    /// Unit the scenario navigates by
    pub granularity: Granularity,
    /// Text placed before the fixture inputs; the caret starts inside it
    #[serde(default)]
    pub prefix: String,
    /// Inputs and the speech expected for each, in navigation order
    pub fixture: Vec<FixtureEntry>,
}

/// One navigation step: the text navigated onto and what should be spoken
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixtureEntry {
    pub input: String,
    pub expected: String,
}

/// Speech settings a scenario runs under
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SpeechSettings {
    /// Speak every symbol when moving by word
    #[serde(default)]
    pub symbol_level_word_all: bool,
}

impl SpeechSettings {
    /// Config-path/value pairs to send to the host
    pub fn config_values(&self) -> Vec<(&'static [&'static str], serde_json::Value)> {
        vec![(
            SYMBOL_LEVEL_WORD_ALL,
            serde_json::Value::Bool(self.symbol_level_word_all),
        )]
    }
}

impl TestScenario {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let scenario: TestScenario = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse test scenario: {}", e)))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read test scenario '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("Scenario name must not be empty".to_string()));
        }
        if self.fixture.is_empty() {
            return Err(Error::Config(format!(
                "Scenario '{}' has an empty fixture",
                self.name
            )));
        }
        Ok(())
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }

    /// Text loaded into the editor: the prefix followed by the joined inputs
    pub fn input_text(&self) -> String {
        let inputs: Vec<&str> = self.fixture.iter().map(|e| e.input.as_str()).collect();
        format!("{}{}", self.prefix, inputs.join(self.granularity.separator()))
    }

    /// Expected speech, one utterance per fixture entry
    pub fn expected(&self) -> Vec<Utterance> {
        self.fixture
            .iter()
            .map(|e| Utterance::new(e.expected.clone()))
            .collect()
    }

    /// Key pressed once per fixture entry
    pub fn key(&self) -> NavKey {
        self.granularity.next_key()
    }
}
