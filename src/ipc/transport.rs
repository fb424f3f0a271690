//! Cross-platform IPC transport layer
//!
//! Frames are a little-endian `u32` length followed by a JSON body. The
//! socket is a Unix domain socket on Unix/macOS and a named pipe on Windows,
//! both provided by the interprocess crate.

use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::common::paths;

/// Maximum frame body size (10 MB)
pub const MAX_MESSAGE_SIZE: u32 = 10 * 1024 * 1024;

pub mod platform {
    pub use interprocess::local_socket::tokio::{prelude::*, Listener, Stream};
    pub use interprocess::local_socket::{ListenerOptions, Name};

    #[cfg(unix)]
    pub use interprocess::local_socket::{GenericFilePath, ToFsName};

    #[cfg(windows)]
    pub use interprocess::local_socket::{GenericNamespaced, ToNsName};
}

use platform::*;

pub use platform::Stream;

/// Resolve the host socket to an interprocess name
fn host_name() -> io::Result<Name<'static>> {
    let name = paths::socket_name();

    #[cfg(unix)]
    let name = name.to_fs_name::<GenericFilePath>()?;

    #[cfg(windows)]
    let name = name.to_ns_name::<GenericNamespaced>()?;

    Ok(name)
}

/// Create the listener the speech host accepts clients on
///
/// Removes a stale socket left behind by a host that did not shut down cleanly.
pub async fn create_listener() -> io::Result<Listener> {
    paths::ensure_socket_dir()?;
    paths::remove_socket()?;

    let listener = ListenerOptions::new().name(host_name()?).create_tokio()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(paths::socket_path(), std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(listener)
}

/// Connect to the speech host's socket
pub async fn connect() -> io::Result<Stream> {
    Stream::connect(host_name()?).await
}

/// Write one frame
pub async fn send_message<W: AsyncWriteExt + Unpin>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    let len = u32::try_from(data.len())
        .ok()
        .filter(|len| *len <= MAX_MESSAGE_SIZE)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Message too large: {} bytes", data.len()),
            )
        })?;

    writer.write_all(&len.to_le_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await
}

/// Read one frame
pub async fn recv_message<R: AsyncReadExt + Unpin>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_le_bytes(len_buf);

    if len > MAX_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Message too large: {} bytes", len),
        ));
    }

    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data).await?;
    Ok(data)
}

/// Check if the host socket exists
///
/// Always true on Windows, where only a connection attempt can tell.
pub fn socket_exists() -> bool {
    #[cfg(unix)]
    {
        paths::socket_path().exists()
    }

    #[cfg(windows)]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_frames_keep_boundaries() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        send_message(&mut client, b"{\"id\":1}").await.unwrap();
        send_message(&mut client, "➔👕".as_bytes()).await.unwrap();

        assert_eq!(recv_message(&mut server).await.unwrap(), b"{\"id\":1}");
        assert_eq!(recv_message(&mut server).await.unwrap(), "➔👕".as_bytes());
    }

    #[tokio::test]
    async fn test_oversized_length_prefix_rejected() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client
            .write_all(&(MAX_MESSAGE_SIZE + 1).to_le_bytes())
            .await
            .unwrap();

        let err = recv_message(&mut server).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_truncated_frame_is_eof() {
        let (mut client, mut server) = tokio::io::duplex(64);
        client.write_all(&8u32.to_le_bytes()).await.unwrap();
        client.write_all(b"abc").await.unwrap();
        drop(client);

        let err = recv_message(&mut server).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
