use std::fmt;

use serde::{Deserialize, Serialize};

/// One unit of speech captured after a single key press
///
/// An empty utterance means the key produced no speech; it still occupies
/// its slot in a collected sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Utterance(String);

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The "no speech" sentinel
    pub fn silence() -> Self {
        Self(String::new())
    }

    pub fn is_silent(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Utterance {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Utterance {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl PartialEq<&str> for Utterance {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Build an utterance sequence from string literals
pub fn utterances<I, S>(items: I) -> Vec<Utterance>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(|s| Utterance::new(s)).collect()
}
