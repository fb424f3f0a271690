//! Speech host server - IPC listener and main event loop

use std::time::{Duration, Instant};

use interprocess::local_socket::traits::tokio::Listener as ListenerTrait;
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

use crate::common::{config::Config, error::IpcError, paths, Result};
use crate::ipc::{
    protocol::{Command, Request, Response},
    transport::{self, platform::Stream},
};

use super::backend::SpeechBackend;
use super::handler;

/// How long a connected client may stay silent before it is dropped
const CLIENT_IDLE: Duration = Duration::from_secs(300);

/// How often the accept loop wakes up to check the idle timeout
const TICK: Duration = Duration::from_secs(1);

/// Why the accept loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Idle,
    ShutdownCommand,
    Signal(&'static str),
}

/// Main host server
pub struct Host<B> {
    idle_timeout: Duration,
    backend: B,
    last_activity: Instant,
    shutdown_requested: bool,
}

impl<B: SpeechBackend> Host<B> {
    pub fn new(config: Config, backend: B) -> Self {
        Self {
            idle_timeout: Duration::from_secs(
                config.host.idle_timeout_minutes.saturating_mul(60),
            ),
            backend,
            last_activity: Instant::now(),
            shutdown_requested: false,
        }
    }

    /// Serve clients until idle, told to shut down or signalled
    pub async fn run(&mut self) -> Result<()> {
        let listener = transport::create_listener().await?;
        tracing::info!(
            backend = self.backend.name(),
            "Speech host listening on {}",
            paths::socket_name()
        );

        let mut signals = Signals::new()?;
        let mut tick = tokio::time::interval(TICK);

        let exit = loop {
            if let Some(exit) = self.should_exit() {
                break exit;
            }

            tokio::select! {
                name = signals.recv() => break Exit::Signal(name),
                accepted = listener.accept() => match accepted {
                    Ok(stream) => self.serve(stream).await,
                    Err(e) => tracing::error!("Accept error: {}", e),
                },
                _ = tick.tick() => {}
            }
        };

        tracing::info!(?exit, "Speech host shutting down");
        paths::remove_socket()?;
        Ok(())
    }

    fn should_exit(&self) -> Option<Exit> {
        if self.shutdown_requested {
            Some(Exit::ShutdownCommand)
        } else if self.last_activity.elapsed() > self.idle_timeout {
            Some(Exit::Idle)
        } else {
            None
        }
    }

    async fn serve(&mut self, stream: Stream) {
        self.last_activity = Instant::now();
        let (reader, writer) = tokio::io::split(stream);
        if let Err(e) = self.handle_client(BufReader::new(reader), writer).await {
            tracing::error!("Error handling client: {}", e);
        }
        self.last_activity = Instant::now();
    }

    /// Answer one client's requests strictly in arrival order
    ///
    /// A key press is fully spoken and answered before the next request is
    /// read, so speech never interleaves between presses.
    async fn handle_client<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            let data = match tokio::time::timeout(CLIENT_IDLE, transport::recv_message(&mut reader)).await {
                Err(_) => {
                    tracing::debug!("Client idle, dropping connection");
                    return Ok(());
                }
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    tracing::debug!("Client disconnected");
                    return Ok(());
                }
                Ok(Err(e)) => return Err(e.into()),
                Ok(Ok(data)) => data,
            };

            let response = self.respond(&data);
            transport::send_message(&mut writer, &serde_json::to_vec(&response)?).await?;

            if self.shutdown_requested {
                return Ok(());
            }
        }
    }

    fn respond(&mut self, data: &[u8]) -> Response {
        let request: Request = match serde_json::from_slice(data) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                return Response::error(
                    0,
                    IpcError {
                        code: "INVALID_REQUEST".to_string(),
                        message: e.to_string(),
                    },
                );
            }
        };

        tracing::debug!(id = request.id, command = ?request.command, "Request");

        if matches!(request.command, Command::Shutdown) {
            self.shutdown_requested = true;
            return Response::ok(request.id);
        }

        handler::handle_command(&mut self.backend, request.id, request.command)
    }
}

/// Termination signals the host exits on
#[cfg(unix)]
struct Signals {
    term: tokio::signal::unix::Signal,
    int: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn new() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            term: signal(SignalKind::terminate())?,
            int: signal(SignalKind::interrupt())?,
        })
    }

    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.term.recv() => "SIGTERM",
            _ = self.int.recv() => "SIGINT",
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn new() -> Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) -> &'static str {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "Ctrl+C",
            Err(_) => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimulatedBackend;
    use crate::ipc::protocol::Command;
    use crate::speech::NavKey;
    use tokio::io::AsyncWriteExt;

    fn host() -> Host<SimulatedBackend> {
        Host::new(Config::default(), SimulatedBackend::default())
    }

    fn frame(id: u64, command: Command) -> Vec<u8> {
        serde_json::to_vec(&Request { id, command }).unwrap()
    }

    async fn exchange(host: &mut Host<SimulatedBackend>, requests: Vec<Vec<u8>>) -> Vec<Response> {
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server);
        let (mut client_read, mut client_write) = tokio::io::split(client);

        for request in &requests {
            transport::send_message(&mut client_write, request).await.unwrap();
        }
        client_write.shutdown().await.unwrap();

        host.handle_client(BufReader::new(server_read), server_write)
            .await
            .unwrap();

        let mut responses = Vec::new();
        while let Ok(data) = transport::recv_message(&mut client_read).await {
            responses.push(serde_json::from_slice(&data).unwrap());
        }
        responses
    }

    #[tokio::test]
    async fn test_requests_answered_in_order() {
        let mut host = host();
        let key = NavKey::new("numpad6").unwrap();

        let responses = exchange(
            &mut host,
            vec![
                frame(1, Command::PrepareEditor { text: "one two".into() }),
                frame(2, Command::SpeechAfterKey { key: key.clone() }),
                frame(3, Command::SpeechAfterKey { key }),
            ],
        )
        .await;

        let ids: Vec<u64> = responses.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(responses[1].result.as_ref().unwrap()["speech"], "two");
        assert_eq!(responses[2].result.as_ref().unwrap()["speech"], "bottom");
    }

    #[tokio::test]
    async fn test_shutdown_stops_reading() {
        let mut host = host();

        let responses = exchange(
            &mut host,
            vec![frame(1, Command::Shutdown), frame(2, Command::Status)],
        )
        .await;

        assert_eq!(responses.len(), 1);
        assert!(responses[0].success);
        assert_eq!(host.should_exit(), Some(Exit::ShutdownCommand));
    }

    #[tokio::test]
    async fn test_invalid_request_gets_error_response() {
        let mut host = host();

        let responses = exchange(&mut host, vec![b"{not json".to_vec()]).await;

        assert_eq!(responses.len(), 1);
        assert!(!responses[0].success);
        assert_eq!(responses[0].error.as_ref().unwrap().code, "INVALID_REQUEST");
        assert_eq!(host.should_exit(), None);
    }

    #[test]
    fn test_idle_timeout() {
        let mut config = Config::default();
        config.host.idle_timeout_minutes = 0;
        let mut host = Host::new(config, SimulatedBackend::default());
        host.last_activity = Instant::now() - Duration::from_millis(10);

        assert_eq!(host.should_exit(), Some(Exit::Idle));
    }

    #[test]
    fn test_huge_idle_timeout_saturates() {
        let mut config = Config::default();
        config.host.idle_timeout_minutes = u64::MAX;
        let host = Host::new(config, SimulatedBackend::default());

        assert_eq!(host.idle_timeout, Duration::from_secs(u64::MAX));
        assert_eq!(host.should_exit(), None);
    }
}
