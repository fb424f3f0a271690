//! Speech host - background process owning the editor under test
//!
//! The CLI spawns the host on demand with the hidden `host` subcommand.
//! The host:
//! 1. Creates an IPC socket/pipe for CLI connections
//! 2. Loads text into its editor and applies speech settings on request
//! 3. Answers each key press with the speech it produced
//! 4. Exits after an idle timeout, a `shutdown` command or a signal

pub mod backend;
mod handler;
pub mod local;
mod server;
pub mod simulated;
mod symbols;

pub use backend::{SpeechBackend, SpeechConfig};
pub use local::LocalHost;
pub use server::Host;
pub use simulated::SimulatedBackend;

use crate::common::{config::Config, Result};

/// Run in host mode with the simulated backend
pub async fn run() -> Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "Starting speech host"
    );

    let config = Config::load()?;
    let backend = SimulatedBackend::new(config.speech);
    Host::new(config, backend).run().await
}
