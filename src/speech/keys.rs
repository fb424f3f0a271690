//! Navigation keys and granularities
//!
//! Key names follow the desktop layout of the screen reader under test:
//! the numpad rows 7/8/9, 4/5/6 and 1/2/3 move by line, word and character,
//! and within a row the columns move to the previous unit, report the
//! current unit, or move to the next unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};

pub const PREVIOUS_CHAR: &str = "numpad1";
pub const CURRENT_CHAR: &str = "numpad2";
pub const NEXT_CHAR: &str = "numpad3";
pub const PREVIOUS_WORD: &str = "numpad4";
pub const CURRENT_WORD: &str = "numpad5";
pub const NEXT_WORD: &str = "numpad6";
pub const PREVIOUS_LINE: &str = "numpad7";
pub const CURRENT_LINE: &str = "numpad8";
pub const NEXT_LINE: &str = "numpad9";

/// Unit of text navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[serde(alias = "char")]
    Character,
    Word,
    Line,
}

impl Granularity {
    /// Separator placed between fixture inputs of this granularity
    pub fn separator(self) -> &'static str {
        match self {
            Granularity::Character => "",
            Granularity::Word => " ",
            Granularity::Line => "\n",
        }
    }

    /// Key that moves to the next unit
    pub fn next_key(self) -> NavKey {
        NavKey::from_static(match self {
            Granularity::Character => NEXT_CHAR,
            Granularity::Word => NEXT_WORD,
            Granularity::Line => NEXT_LINE,
        })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Character => "character",
            Granularity::Word => "word",
            Granularity::Line => "line",
        };
        f.write_str(name)
    }
}

/// Direction of a navigation key within its granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Previous,
    Current,
    Next,
}

/// Opaque identifier of a key to press
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NavKey(String);

impl NavKey {
    /// Create a key identifier, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidKey("key name is empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    fn from_static(name: &'static str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the navigation action this key performs, if it is a navigation key
    pub fn action(&self) -> Option<(Granularity, Movement)> {
        let action = match self.0.to_ascii_lowercase().as_str() {
            PREVIOUS_CHAR => (Granularity::Character, Movement::Previous),
            CURRENT_CHAR => (Granularity::Character, Movement::Current),
            NEXT_CHAR => (Granularity::Character, Movement::Next),
            PREVIOUS_WORD => (Granularity::Word, Movement::Previous),
            CURRENT_WORD => (Granularity::Word, Movement::Current),
            NEXT_WORD => (Granularity::Word, Movement::Next),
            PREVIOUS_LINE => (Granularity::Line, Movement::Previous),
            CURRENT_LINE => (Granularity::Line, Movement::Current),
            NEXT_LINE => (Granularity::Line, Movement::Next),
            _ => return None,
        };
        Some(action)
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NavKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NavKey> for String {
    fn from(key: NavKey) -> Self {
        key.0
    }
}

impl std::str::FromStr for NavKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_keys_per_granularity() {
        assert_eq!(Granularity::Character.next_key().as_str(), "numpad3");
        assert_eq!(Granularity::Word.next_key().as_str(), "numpad6");
        assert_eq!(Granularity::Line.next_key().as_str(), "numpad9");
    }

    #[test]
    fn test_separators() {
        assert_eq!(Granularity::Character.separator(), "");
        assert_eq!(Granularity::Word.separator(), " ");
        assert_eq!(Granularity::Line.separator(), "\n");
    }

    #[test]
    fn test_key_actions() {
        let key = NavKey::new("NumPad4").unwrap();
        assert_eq!(key.action(), Some((Granularity::Word, Movement::Previous)));

        let key = NavKey::new("numpad8").unwrap();
        assert_eq!(key.action(), Some((Granularity::Line, Movement::Current)));

        let key = NavKey::new("f13").unwrap();
        assert_eq!(key.action(), None);
    }

    #[test]
    fn test_blank_key_rejected() {
        assert!(matches!(NavKey::new("  "), Err(Error::InvalidKey(_))));
        assert!(serde_json::from_str::<NavKey>("\"\"").is_err());
    }

    #[test]
    fn test_granularity_accepts_char_alias() {
        let g: Granularity = serde_yaml::from_str("char").unwrap();
        assert_eq!(g, Granularity::Character);
        let g: Granularity = serde_yaml::from_str("line").unwrap();
        assert_eq!(g, Granularity::Line);
    }
}
