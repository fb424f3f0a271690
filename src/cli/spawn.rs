//! Speech host spawning logic
//!
//! Spawns the host process when needed, using the same binary with the
//! hidden `host` subcommand.

use std::process::Stdio;
use std::time::{Duration, Instant};

use crate::common::{config::Config, paths, Error, Result};
use crate::ipc::{transport, HostClient};

/// Ensure the speech host is running, spawning it if allowed
pub async fn ensure_host_running(config: &Config) -> Result<()> {
    match HostClient::connect(config).await {
        Ok(_) => Ok(()),
        Err(Error::HostNotRunning) if config.host.autostart => {
            spawn_host(config.timeouts.connect_secs).await
        }
        Err(e) => Err(e),
    }
}

/// Spawn the host process and wait until it accepts connections
async fn spawn_host(timeout_secs: u64) -> Result<()> {
    tracing::debug!("Spawning speech host process");

    let exe_path = std::env::current_exe().map_err(|e| {
        Error::Internal(format!("Failed to get current executable path: {}", e))
    })?;

    paths::ensure_socket_dir()?;
    paths::remove_socket()?;

    // The host logs to its own file, so no terminal output is kept
    let mut command = std::process::Command::new(&exe_path);
    command
        .arg("host")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // New process group so terminal signals aimed at the CLI don't reach the host
        command.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const DETACHED_PROCESS: u32 = 0x00000008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x00000200;
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    command
        .spawn()
        .map_err(|e| Error::Internal(format!("Failed to spawn speech host: {}", e)))?;

    let deadline = Instant::now() + Duration::from_secs(timeout_secs);

    loop {
        if Instant::now() >= deadline {
            return Err(Error::HostSpawnTimeout(timeout_secs));
        }

        tokio::time::sleep(Duration::from_millis(50)).await;

        if !transport::socket_exists() {
            continue;
        }

        if transport::connect().await.is_ok() {
            tracing::debug!("Speech host started successfully");
            return Ok(());
        }
    }
}
