//! Logging and tracing configuration
//!
//! The CLI logs compactly to stderr so stdout stays reserved for speech and
//! reports. The host runs in the background and logs to a file.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::paths;

const HOST_LOG: &str = "host.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies.
pub fn init_cli() {
    tracing_subscriber::registry()
        .with(env_filter("speechnav=info,warn"))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}

/// Initialize tracing for the speech host
///
/// Writes a detailed log to `<data dir>/speech-nav/logs/host.log` and a
/// compact copy to stderr, which only matters while the spawning CLI is
/// still attached. Default level is DEBUG so every key press and utterance
/// is recorded. Returns the log file path if it could be opened.
pub fn init_host() -> Option<PathBuf> {
    let (log_path, file) = open_host_log().unzip();

    let file_layer = file.map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_ids(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter("speechnav=debug,info"))
        .with(file_layer)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();

    log_path
}

fn open_host_log() -> Option<(PathBuf, File)> {
    let path = host_log_path()?;
    let dir = path.parent()?;

    let opened = std::fs::create_dir_all(dir)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));

    match opened {
        Ok(file) => Some((path, file)),
        Err(e) => {
            eprintln!("Warning: Could not open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Get the path to the host log file
pub fn host_log_path() -> Option<PathBuf> {
    paths::log_dir().map(|d| d.join(HOST_LOG))
}

/// Truncate the host log file
pub fn truncate_host_log() -> std::io::Result<()> {
    match host_log_path() {
        Some(path) if path.exists() => File::create(path).map(|_| ()),
        _ => Ok(()),
    }
}
