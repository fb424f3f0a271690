//! CLI-side IPC client for communicating with the speech host

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, WriteHalf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::common::{config::Config, error::IpcError, Error, Result};
use crate::speech::{EditorSetup, KeySpeech, NavKey, SpeechConfigurator, Utterance};

use super::protocol::{Command, Request, Response, SpeechResult, StatusResult};
use super::transport::{self, Stream};

/// Frames read ahead of the request waiting for them
const RESPONSE_BACKLOG: usize = 16;

/// Client for communicating with the speech host
///
/// Responses are read whole by a background task, so a request that times
/// out never leaves a half-read frame on the connection. A late response to
/// a timed-out request is discarded when it arrives.
pub struct HostClient<W = WriteHalf<Stream>> {
    writer: W,
    responses: mpsc::Receiver<std::io::Result<Vec<u8>>>,
    reader_task: JoinHandle<()>,
    next_id: u64,
    timeout_secs: u64,
}

impl HostClient {
    /// Connect to the running host using the configured speech timeout
    pub async fn connect(config: &Config) -> Result<Self> {
        let stream = transport::connect().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound
                || e.kind() == std::io::ErrorKind::ConnectionRefused
            {
                Error::HostNotRunning
            } else {
                Error::HostConnectionFailed(e)
            }
        })?;

        Ok(Self::from_stream(stream, config.timeouts.speech_secs))
    }
}

impl<S> HostClient<WriteHalf<S>>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Wrap a connected stream; must be called inside a tokio runtime
    fn from_stream(stream: S, timeout_secs: u64) -> Self {
        let (mut reader, writer) = tokio::io::split(stream);
        let (tx, responses) = mpsc::channel(RESPONSE_BACKLOG);

        let reader_task = tokio::spawn(async move {
            loop {
                let frame = transport::recv_message(&mut reader).await;
                let failed = frame.is_err();
                if tx.send(frame).await.is_err() || failed {
                    break;
                }
            }
        });

        Self {
            writer,
            responses,
            reader_task,
            next_id: 1,
            timeout_secs,
        }
    }
}

impl<W: AsyncWrite + Unpin + Send> HostClient<W> {
    /// Send a command and wait for the response
    ///
    /// Waiting is bounded by the speech timeout. The client stays usable
    /// after a timeout.
    pub async fn send_command(&mut self, command: Command) -> Result<serde_json::Value> {
        let id = self.next_id;
        self.next_id += 1;

        let json = serde_json::to_vec(&Request { id, command })?;
        transport::send_message(&mut self.writer, &json)
            .await
            .map_err(|e| Error::HostCommunication(e.to_string()))?;

        let limit = Duration::from_secs(self.timeout_secs);
        let response = match tokio::time::timeout(limit, self.response_for(id)).await {
            Ok(response) => response?,
            Err(_) => {
                tracing::debug!(id, "Request timed out");
                return Err(Error::SpeechTimeout(self.timeout_secs));
            }
        };

        if response.success {
            Ok(response.result.unwrap_or(serde_json::json!({})))
        } else {
            let error = response.error.unwrap_or_else(|| IpcError {
                code: "UNKNOWN".to_string(),
                message: "Unknown error".to_string(),
            });
            Err(error.into())
        }
    }

    /// Next response for request `id`, skipping answers to earlier requests
    async fn response_for(&mut self, id: u64) -> Result<Response> {
        loop {
            let data = match self.responses.recv().await {
                Some(Ok(data)) => data,
                Some(Err(e)) => return Err(Error::HostCommunication(e.to_string())),
                None => {
                    return Err(Error::HostCommunication(
                        "Connection to speech host closed".to_string(),
                    ))
                }
            };

            let response: Response = serde_json::from_slice(&data)?;

            if response.id < id {
                tracing::debug!(stale = response.id, id, "Discarding late response");
                continue;
            }
            if response.id != id {
                return Err(Error::HostCommunication(format!(
                    "Response ID mismatch: expected {}, got {}",
                    id, response.id
                )));
            }
            return Ok(response);
        }
    }

    /// Fetch the host status
    pub async fn status(&mut self) -> Result<StatusResult> {
        let result = self.send_command(Command::Status).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Ask the host to exit
    pub async fn shutdown(&mut self) -> Result<()> {
        self.send_command(Command::Shutdown).await?;
        Ok(())
    }
}

impl<W> Drop for HostClient<W> {
    fn drop(&mut self) {
        self.reader_task.abort();
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> EditorSetup for HostClient<W> {
    async fn prepare_editor(&mut self, text: &str) -> Result<()> {
        self.send_command(Command::PrepareEditor {
            text: text.to_string(),
        })
        .await?;
        Ok(())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> SpeechConfigurator for HostClient<W> {
    async fn set_config_value(&mut self, path: &[&str], value: serde_json::Value) -> Result<()> {
        self.send_command(Command::SetConfigValue {
            path: path.iter().map(|s| s.to_string()).collect(),
            value,
        })
        .await?;
        Ok(())
    }

    async fn reset_config(&mut self) -> Result<()> {
        self.send_command(Command::ResetConfig).await?;
        Ok(())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> KeySpeech for HostClient<W> {
    async fn speech_after_key(&mut self, key: &NavKey) -> Result<Utterance> {
        let result = self
            .send_command(Command::SpeechAfterKey { key: key.clone() })
            .await?;
        let speech: SpeechResult = serde_json::from_value(result)?;
        Ok(speech.speech)
    }
}
