//! Command handler for processing IPC requests
//!
//! Translates IPC commands into backend calls.

use serde_json::json;

use crate::common::{error::IpcError, Error, Result};
use crate::ipc::protocol::{Command, Response, SpeechResult};

use super::backend::SpeechBackend;

/// Handle an IPC command
pub fn handle_command(backend: &mut dyn SpeechBackend, id: u64, command: Command) -> Response {
    match handle_command_inner(backend, command) {
        Ok(result) => Response::success(id, result),
        Err(e) => {
            tracing::warn!(id, error = %e, "Command failed");
            Response::error(id, IpcError::from(&e))
        }
    }
}

fn handle_command_inner(
    backend: &mut dyn SpeechBackend,
    command: Command,
) -> Result<serde_json::Value> {
    match command {
        Command::PrepareEditor { text } => {
            backend.prepare_editor(&text)?;
            Ok(json!({ "status": "prepared", "chars": text.chars().count() }))
        }

        Command::SetConfigValue { path, value } => {
            backend.set_config_value(&path, &value)?;
            Ok(json!({ "path": path, "value": value }))
        }

        Command::ResetConfig => {
            backend.reset_config();
            Ok(json!({ "status": "reset" }))
        }

        Command::SpeechAfterKey { key } => {
            let speech = backend.speech_after_key(&key)?;
            Ok(serde_json::to_value(SpeechResult { speech })?)
        }

        Command::Status => Ok(serde_json::to_value(backend.status())?),

        // The server intercepts shutdown before dispatching
        Command::Shutdown => Err(Error::Internal(
            "Shutdown must be handled by the server".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedBackend;
    use crate::speech::NavKey;

    #[test]
    fn test_prepare_then_speak() {
        let mut backend = SimulatedBackend::default();

        let response = handle_command(
            &mut backend,
            1,
            Command::PrepareEditor {
                text: "Test: Say".to_string(),
            },
        );
        assert!(response.success);

        let response = handle_command(
            &mut backend,
            2,
            Command::SpeechAfterKey {
                key: NavKey::new("numpad6").unwrap(),
            },
        );
        assert!(response.success);
        assert_eq!(response.id, 2);
        assert_eq!(response.result.unwrap()["speech"], "Say");
    }

    #[test]
    fn test_errors_become_codes() {
        let mut backend = SimulatedBackend::default();

        let response = handle_command(
            &mut backend,
            3,
            Command::SpeechAfterKey {
                key: NavKey::new("numpad6").unwrap(),
            },
        );
        assert!(!response.success);
        assert_eq!(response.error.unwrap().code, "EDITOR_NOT_PREPARED");

        let response = handle_command(
            &mut backend,
            4,
            Command::SetConfigValue {
                path: vec!["speech".to_string(), "volume".to_string()],
                value: json!(3),
            },
        );
        assert_eq!(response.error.unwrap().code, "INVALID_CONFIG_PATH");
    }

    #[test]
    fn test_status_reflects_config() {
        let mut backend = SimulatedBackend::default();
        handle_command(
            &mut backend,
            1,
            Command::SetConfigValue {
                path: vec!["speech".to_string(), "symbolLevelWordAll".to_string()],
                value: json!(true),
            },
        );

        let response = handle_command(&mut backend, 2, Command::Status);
        let status = response.result.unwrap();
        assert_eq!(status["symbol_level_word_all"], true);
        assert_eq!(status["backend"], "simulated");
        assert_eq!(status["editor_prepared"], false);

        handle_command(&mut backend, 3, Command::ResetConfig);
        let response = handle_command(&mut backend, 4, Command::Status);
        assert_eq!(response.result.unwrap()["symbol_level_word_all"], false);
    }
}
