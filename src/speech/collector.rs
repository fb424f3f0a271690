//! Key-press speech collection
//!
//! Presses a key a fixed number of times and records what was spoken after
//! each press. Nothing is checked here: the whole sequence is gathered first
//! so a failing comparison can show everything that was said.

use crate::common::Result;

use super::host::KeySpeech;
use super::keys::NavKey;
use super::utterance::Utterance;

/// Press `key` exactly `times` times, returning one utterance per press in press order
///
/// Collaborator errors (including its timeout) are returned as-is on the
/// first failing press. There is no retry.
pub async fn collect<H>(host: &mut H, key: &NavKey, times: usize) -> Result<Vec<Utterance>>
where
    H: KeySpeech + ?Sized,
{
    let mut spoken = Vec::with_capacity(times);
    collect_into(host, key, times, &mut spoken).await?;
    Ok(spoken)
}

/// Like [`collect`], appending to `spoken` as it goes
///
/// On error `spoken` keeps the speech of every press that succeeded.
pub async fn collect_into<H>(
    host: &mut H,
    key: &NavKey,
    times: usize,
    spoken: &mut Vec<Utterance>,
) -> Result<()>
where
    H: KeySpeech + ?Sized,
{
    for press in 1..=times {
        let utterance = host.speech_after_key(key).await?;
        tracing::debug!(key = %key, press, speech = %utterance, "Collected speech");
        spoken.push(utterance);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::speech::utterance::utterances;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// Replays canned speech and records every key it was asked to press
    struct Scripted {
        speech: VecDeque<Result<Utterance>>,
        pressed: Vec<String>,
    }

    impl Scripted {
        fn new(speech: Vec<Result<Utterance>>) -> Self {
            Self {
                speech: speech.into(),
                pressed: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl KeySpeech for Scripted {
        async fn speech_after_key(&mut self, key: &NavKey) -> Result<Utterance> {
            self.pressed.push(key.to_string());
            self.speech
                .pop_front()
                .unwrap_or_else(|| Err(Error::SpeechTimeout(1)))
        }
    }

    fn key(name: &str) -> NavKey {
        NavKey::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_collects_in_press_order() {
        let mut host = Scripted::new(vec![
            Ok("Say".into()),
            Ok("(quietly)".into()),
            Ok("Hello,".into()),
        ]);

        let spoken = collect(&mut host, &key("numpad6"), 3).await.unwrap();

        assert_eq!(spoken, utterances(["Say", "(quietly)", "Hello,"]));
        assert_eq!(host.pressed, vec!["numpad6"; 3]);
    }

    #[tokio::test]
    async fn test_keeps_duplicates_and_silence() {
        let mut host = Scripted::new(vec![
            Ok("space".into()),
            Ok(Utterance::silence()),
            Ok("space".into()),
        ]);

        let spoken = collect(&mut host, &key("numpad3"), 3).await.unwrap();

        assert_eq!(spoken.len(), 3);
        assert_eq!(spoken[0], spoken[2]);
        assert!(spoken[1].is_silent());
    }

    #[tokio::test]
    async fn test_single_press() {
        let mut host = Scripted::new(vec![Ok("S".into()), Ok("extra".into())]);

        let spoken = collect(&mut host, &key("numpad3"), 1).await.unwrap();

        assert_eq!(spoken, utterances(["S"]));
        assert_eq!(host.pressed.len(), 1);
    }

    #[tokio::test]
    async fn test_zero_presses() {
        let mut host = Scripted::new(vec![Ok("unused".into())]);

        let spoken = collect(&mut host, &key("numpad3"), 0).await.unwrap();

        assert!(spoken.is_empty());
        assert!(host.pressed.is_empty());
    }

    #[tokio::test]
    async fn test_collaborator_error_stops_collection() {
        let mut host = Scripted::new(vec![Ok("Say".into()), Err(Error::SpeechTimeout(10))]);

        let err = collect(&mut host, &key("numpad6"), 4).await.unwrap_err();

        assert!(matches!(err, Error::SpeechTimeout(10)));
        // No retry after the failing press
        assert_eq!(host.pressed.len(), 2);
    }

    #[tokio::test]
    async fn test_collect_into_keeps_speech_before_error() {
        let mut host = Scripted::new(vec![
            Ok("Say".into()),
            Ok("(quietly)".into()),
            Err(Error::SpeechTimeout(10)),
        ]);
        let mut spoken = Vec::new();

        let err = collect_into(&mut host, &key("numpad6"), 4, &mut spoken)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::SpeechTimeout(10)));
        assert_eq!(spoken, utterances(["Say", "(quietly)"]));
    }
}
