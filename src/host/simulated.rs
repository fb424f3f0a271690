//! In-memory editor with a small, fixed pronunciation table
//!
//! Stands in for a real screen reader so scenarios can run anywhere. The
//! caret moves over characters, whitespace-delimited words and
//! newline-delimited lines; each press speaks the unit the caret lands on.

use serde_json::Value;

use crate::common::{config::SpeechDefaults, Error, Result};
use crate::ipc::protocol::StatusResult;
use crate::speech::{Granularity, Movement, NavKey, Utterance};

use super::backend::{SpeechBackend, SpeechConfig};
use super::symbols::{self, InText};

const AT_END: &str = "bottom";
const AT_START: &str = "top";
const EMPTY_UNIT: &str = "blank";

#[derive(Debug)]
struct Editor {
    chars: Vec<char>,
    caret: usize,
}

impl Editor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            caret: 0,
        }
    }

    fn unit_starts(&self, granularity: Granularity) -> Vec<usize> {
        let chars = &self.chars;
        match granularity {
            Granularity::Character => (0..chars.len()).collect(),
            Granularity::Word => (0..chars.len())
                .filter(|&i| !chars[i].is_whitespace() && (i == 0 || chars[i - 1].is_whitespace()))
                .collect(),
            Granularity::Line => std::iter::once(0)
                .chain((0..chars.len()).filter(|&i| chars[i] == '\n').map(|i| i + 1))
                .collect(),
        }
    }

    fn unit_end(&self, start: usize, granularity: Granularity) -> usize {
        let rest = &self.chars[start..];
        let len = match granularity {
            Granularity::Character => 1.min(rest.len()),
            Granularity::Word => rest.iter().position(|c| c.is_whitespace()).unwrap_or(rest.len()),
            Granularity::Line => rest.iter().position(|&c| c == '\n').unwrap_or(rest.len()),
        };
        start + len
    }

    /// Move the caret and return the start of the unit to speak
    fn navigate(&mut self, granularity: Granularity, movement: Movement) -> Option<usize> {
        let starts = self.unit_starts(granularity);
        let caret = self.caret;
        let current = starts.iter().copied().rev().find(|&s| s <= caret);
        let target = match movement {
            Movement::Next => starts.iter().copied().find(|&s| s > caret),
            Movement::Previous => current.and_then(|cur| starts.iter().copied().rev().find(|&s| s < cur)),
            Movement::Current => current,
        }?;
        self.caret = target;
        Some(target)
    }
}

/// Render a word or line the way the synthesizer would receive it
fn render(text: &[char], granularity: Granularity, config: SpeechConfig) -> String {
    let name_everything = granularity == Granularity::Word && config.symbol_level_word_all;

    let mut spoken = String::with_capacity(text.len());
    for &ch in text {
        let Some(symbol) = symbols::lookup(ch) else {
            spoken.push(ch);
            continue;
        };

        let in_text = if name_everything {
            InText::Name
        } else {
            symbol.in_text
        };
        match in_text {
            InText::Keep => spoken.push(ch),
            InText::Drop => spoken.push(' '),
            InText::Name => {
                let name = match granularity {
                    Granularity::Line => symbol.line_name(),
                    _ => symbol.name,
                };
                spoken.push(' ');
                spoken.push_str(name);
                spoken.push(' ');
            }
        }
    }

    spoken.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Speech backend over an in-memory editor
#[derive(Debug)]
pub struct SimulatedBackend {
    defaults: SpeechConfig,
    config: SpeechConfig,
    editor: Option<Editor>,
}

impl SimulatedBackend {
    pub fn new(defaults: SpeechDefaults) -> Self {
        let defaults = SpeechConfig::from(defaults);
        Self {
            defaults,
            config: defaults,
            editor: None,
        }
    }

    fn speak(&mut self, granularity: Granularity, movement: Movement) -> Result<Utterance> {
        let config = self.config;
        let editor = self.editor.as_mut().ok_or(Error::EditorNotPrepared)?;

        let Some(start) = editor.navigate(granularity, movement) else {
            let boundary = match movement {
                Movement::Next => AT_END,
                Movement::Previous => AT_START,
                Movement::Current => EMPTY_UNIT,
            };
            return Ok(Utterance::new(boundary));
        };

        let end = editor.unit_end(start, granularity);
        let unit = &editor.chars[start..end];

        let spoken = match granularity {
            Granularity::Character => match unit.first() {
                Some(&ch) => symbols::character_name(ch),
                None => EMPTY_UNIT.to_string(),
            },
            _ => render(unit, granularity, config),
        };

        if spoken.is_empty() {
            return Ok(Utterance::new(EMPTY_UNIT));
        }
        Ok(Utterance::new(spoken))
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(SpeechDefaults::default())
    }
}

impl SpeechBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn prepare_editor(&mut self, text: &str) -> Result<()> {
        tracing::debug!(chars = text.chars().count(), "Preparing editor");
        self.editor = Some(Editor::new(text));
        Ok(())
    }

    fn set_config_value(&mut self, path: &[String], value: &Value) -> Result<()> {
        self.config.set(path, value)?;
        tracing::debug!(path = %path.join("."), %value, "Speech config updated");
        Ok(())
    }

    fn reset_config(&mut self) {
        self.config = self.defaults;
    }

    fn speech_after_key(&mut self, key: &NavKey) -> Result<Utterance> {
        let (granularity, movement) = key
            .action()
            .ok_or_else(|| Error::UnknownKey(key.to_string()))?;

        let utterance = self.speak(granularity, movement)?;
        tracing::debug!(key = %key, speech = %utterance, "Key pressed");
        Ok(utterance)
    }

    fn status(&self) -> StatusResult {
        StatusResult {
            backend: self.name().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            editor_prepared: self.editor.is_some(),
            text_chars: self.editor.as_ref().map_or(0, |e| e.chars.len()),
            caret: self.editor.as_ref().map_or(0, |e| e.caret),
            symbol_level_word_all: self.config.symbol_level_word_all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::keys::{
        CURRENT_WORD, NEXT_CHAR, NEXT_LINE, NEXT_WORD, PREVIOUS_CHAR, PREVIOUS_LINE,
    };
    use crate::speech::SYMBOL_LEVEL_WORD_ALL;
    use serde_json::json;

    fn press(backend: &mut SimulatedBackend, key: &str, times: usize) -> Vec<String> {
        let key = NavKey::new(key).unwrap();
        (0..times)
            .map(|_| backend.speech_after_key(&key).unwrap().into_string())
            .collect()
    }

    fn set_word_all(backend: &mut SimulatedBackend, on: bool) {
        let path: Vec<String> = SYMBOL_LEVEL_WORD_ALL.iter().map(|s| s.to_string()).collect();
        backend.set_config_value(&path, &json!(on)).unwrap();
    }

    #[test]
    fn test_word_navigation() {
        let mut backend = SimulatedBackend::default();
        backend
            .prepare_editor("Test: Say (quietly) \"Hello, Jim\". ➔ 👕")
            .unwrap();

        assert_eq!(
            press(&mut backend, NEXT_WORD, 6),
            ["Say", "(quietly)", "Hello,", "Jim .", "right pointing arrow", "t shirt"]
        );
    }

    #[test]
    fn test_line_navigation() {
        let mut backend = SimulatedBackend::default();
        backend
            .prepare_editor("Test:\nSay\n(quietly)\n\"Hello,\nJim\".\n➔\n👕")
            .unwrap();

        assert_eq!(
            press(&mut backend, NEXT_LINE, 6),
            ["Say", "(quietly)", "Hello,", "Jim .", "right-pointing arrow", "t-shirt"]
        );
    }

    #[test]
    fn test_character_navigation() {
        let mut backend = SimulatedBackend::default();
        backend.prepare_editor(" S ()e,➔👕").unwrap();

        assert_eq!(
            press(&mut backend, NEXT_CHAR, 8),
            [
                "S",
                "space",
                "left paren",
                "right paren",
                "e",
                "comma",
                "right pointing arrow",
                "t shirt"
            ]
        );
    }

    #[test]
    fn test_boundaries() {
        let mut backend = SimulatedBackend::default();
        backend.prepare_editor("ab").unwrap();

        assert_eq!(press(&mut backend, PREVIOUS_CHAR, 1), ["top"]);
        assert_eq!(press(&mut backend, NEXT_CHAR, 2), ["b", "bottom"]);
        assert_eq!(backend.status().caret, 1);
        assert_eq!(press(&mut backend, PREVIOUS_LINE, 1), ["top"]);
    }

    #[test]
    fn test_trailing_newline_is_blank_line() {
        let mut backend = SimulatedBackend::default();
        backend.prepare_editor("only\n").unwrap();

        assert_eq!(press(&mut backend, NEXT_LINE, 2), ["blank", "bottom"]);
    }

    #[test]
    fn test_current_word_inside_word() {
        let mut backend = SimulatedBackend::default();
        backend.prepare_editor("Say hello").unwrap();
        press(&mut backend, NEXT_CHAR, 5);

        assert_eq!(press(&mut backend, CURRENT_WORD, 1), ["hello"]);
    }

    #[test]
    fn test_symbol_level_only_changes_punctuated_words() {
        let text = "Say (quietly) \"Hello, ➔ 👕";
        let mut plain = SimulatedBackend::default();
        plain.prepare_editor(text).unwrap();
        let mut all = SimulatedBackend::default();
        set_word_all(&mut all, true);
        all.prepare_editor(text).unwrap();

        // Start on "Say" by reading the current word first
        let plain_words: Vec<String> = press(&mut plain, CURRENT_WORD, 1)
            .into_iter()
            .chain(press(&mut plain, NEXT_WORD, 4))
            .collect();
        let all_words: Vec<String> = press(&mut all, CURRENT_WORD, 1)
            .into_iter()
            .chain(press(&mut all, NEXT_WORD, 4))
            .collect();

        assert_eq!(plain_words[0], all_words[0]);
        assert_eq!(all_words[1], "left paren quietly right paren");
        assert_ne!(plain_words[1], all_words[1]);
        assert_eq!(all_words[2], "quote Hello comma");
        assert_eq!(plain_words[3], all_words[3]);
        assert_eq!(plain_words[4], all_words[4]);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut backend = SimulatedBackend::new(SpeechDefaults {
            symbol_level_word_all: false,
        });
        set_word_all(&mut backend, true);
        assert!(backend.status().symbol_level_word_all);

        backend.reset_config();
        assert!(!backend.status().symbol_level_word_all);
    }

    #[test]
    fn test_prepare_resets_caret() {
        let mut backend = SimulatedBackend::default();
        backend.prepare_editor("one two").unwrap();
        press(&mut backend, NEXT_WORD, 1);
        backend.prepare_editor("three four").unwrap();

        assert_eq!(backend.status().caret, 0);
        assert_eq!(press(&mut backend, NEXT_WORD, 1), ["four"]);
    }

    #[test]
    fn test_errors() {
        let mut backend = SimulatedBackend::default();
        let key = NavKey::new(NEXT_WORD).unwrap();
        assert!(matches!(
            backend.speech_after_key(&key),
            Err(Error::EditorNotPrepared)
        ));

        backend.prepare_editor("text").unwrap();
        let key = NavKey::new("f13").unwrap();
        assert!(matches!(
            backend.speech_after_key(&key),
            Err(Error::UnknownKey(k)) if k == "f13"
        ));
    }

    #[test]
    fn test_same_text_same_speech() {
        let run = || {
            let mut backend = SimulatedBackend::default();
            backend.prepare_editor("Test: a, b. \"c\"").unwrap();
            press(&mut backend, NEXT_WORD, 4)
        };
        assert_eq!(run(), run());
    }
}
