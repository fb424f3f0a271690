//! Where speech-nav keeps its socket, config and logs
//!
//! Unix/macOS: a Unix domain socket under `$XDG_RUNTIME_DIR` or `/tmp`.
//! Windows: a named pipe, `speech-nav-<username>`.

use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Name of the socket directory, the pipe prefix and the project directories
const APP_NAME: &str = "speech-nav";

const SOCKET_FILE: &str = "host.sock";
const CONFIG_FILE: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// `$XDG_RUNTIME_DIR/speech-nav/host.sock`, or `/tmp/speech-nav-<uid>/host.sock`
/// so users on a shared machine each get their own host
#[cfg(unix)]
pub fn socket_path() -> PathBuf {
    let dir = match std::env::var_os("XDG_RUNTIME_DIR") {
        Some(runtime_dir) => PathBuf::from(runtime_dir).join(APP_NAME),
        None => {
            let uid = unsafe { libc::getuid() };
            PathBuf::from(format!("/tmp/{}-{}", APP_NAME, uid))
        }
    };
    dir.join(SOCKET_FILE)
}

/// Name handed to interprocess when binding or connecting
pub fn socket_name() -> String {
    #[cfg(unix)]
    {
        socket_path().to_string_lossy().into_owned()
    }

    #[cfg(windows)]
    {
        let user = std::env::var("USERNAME").unwrap_or_else(|_| "default".to_string());
        format!("{}-{}", APP_NAME, user)
    }
}

/// Create the socket directory (mode 0700) if it is missing
pub fn ensure_socket_dir() -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

        let socket = socket_path();
        let Some(dir) = socket.parent() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "socket path has no parent"));
        };
        if !dir.is_dir() {
            std::fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)?;
            std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))?;
        }
    }
    Ok(())
}

/// Remove a leftover socket file; named pipes vanish with their owner
pub fn remove_socket() -> io::Result<()> {
    #[cfg(unix)]
    {
        match std::fs::remove_file(socket_path()) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
            _ => {}
        }
    }
    Ok(())
}

/// Platform config directory, e.g. `~/.config/speech-nav/`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Host log directory, e.g. `~/.local/share/speech-nav/logs/`
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_name_mentions_app() {
        assert!(socket_name().contains(APP_NAME));
    }

    #[cfg(unix)]
    #[test]
    fn test_socket_path_file_name() {
        assert_eq!(socket_path().file_name().unwrap(), SOCKET_FILE);
    }

    #[test]
    fn test_config_path_ends_with_toml() {
        if let Some(path) = config_path() {
            assert_eq!(path.file_name().unwrap(), CONFIG_FILE);
        }
    }

    #[test]
    fn test_log_dir_under_data_dir() {
        if let Some(dir) = log_dir() {
            assert!(dir.ends_with("logs"));
        }
    }
}
