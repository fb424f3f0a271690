//! Speech capture for text navigation
//!
//! Keys, utterances, the collaborator traits a host implements, the
//! collector that presses keys and gathers speech, and the comparison that
//! runs once collection is complete.

pub mod collector;
pub mod compare;
pub mod host;
pub mod keys;
mod utterance;

pub use collector::{collect, collect_into};
pub use compare::{compare, Mismatch};
pub use host::{EditorSetup, KeySpeech, SpeechConfigurator, SpeechHost};
pub use keys::{Granularity, Movement, NavKey};
pub use utterance::{utterances, Utterance};

/// Config path of the "speak all symbols when moving by word" flag
pub const SYMBOL_LEVEL_WORD_ALL: &[&str] = &["speech", "symbolLevelWordAll"];
