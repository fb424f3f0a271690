//! Built-in notepad navigation scenarios
//!
//! Embedded from `scenarios/` at build time so the binary can run them
//! without any files on disk.

use crate::common::{Error, Result};

use super::config::TestScenario;

const SOURCES: &[(&str, &str)] = &[
    (
        "move_by_word_symbol_level_word.yaml",
        include_str!("../../scenarios/move_by_word_symbol_level_word.yaml"),
    ),
    ("move_by_word.yaml", include_str!("../../scenarios/move_by_word.yaml")),
    ("move_by_line.yaml", include_str!("../../scenarios/move_by_line.yaml")),
    ("move_by_char.yaml", include_str!("../../scenarios/move_by_char.yaml")),
];

/// All built-in scenarios, disabled ones included
pub fn scenarios() -> Result<Vec<TestScenario>> {
    SOURCES
        .iter()
        .map(|(file, source)| {
            TestScenario::from_yaml(source)
                .map_err(|e| Error::Internal(format!("Built-in scenario {}: {}", file, e)))
        })
        .collect()
}

/// Look up one built-in scenario by name
pub fn find(name: &str) -> Result<TestScenario> {
    scenarios()?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| Error::Config(format!("No built-in scenario named '{}'", name)))
}
