//! Listening-socket constants and options

use std::io;
use std::net::{SocketAddr, TcpListener};

use socket2::{Socket, Type};

use super::tcp::Tcp;

/// Platform default for the maximum length of the pending-connection queue
/// (`SOMAXCONN`).
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const MAX_LISTEN_CONNECTIONS: i32 = 4096;
#[cfg(windows)]
pub const MAX_LISTEN_CONNECTIONS: i32 = 0x7fff_ffff;
#[cfg(not(any(target_os = "linux", target_os = "android", windows)))]
pub const MAX_LISTEN_CONNECTIONS: i32 = 128;

/// The `SO_REUSEADDR` socket option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReuseAddress(pub bool);

impl ReuseAddress {
    #[must_use]
    pub fn value(self) -> bool {
        self.0
    }

    /// Set the option on `socket`.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `setsockopt`.
    pub fn apply(self, socket: &Socket) -> io::Result<()> {
        socket.set_reuse_address(self.0)
    }

    /// Read the option back from `socket`.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `getsockopt`.
    pub fn read(socket: &Socket) -> io::Result<Self> {
        socket.reuse_address().map(Self)
    }
}

impl From<bool> for ReuseAddress {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

/// Open a listening TCP socket on `endpoint`.
///
/// `backlog` is usually [`MAX_LISTEN_CONNECTIONS`].
///
/// # Errors
///
/// Returns the OS error from socket creation, `bind` or `listen`.
pub fn listen(endpoint: SocketAddr, reuse: ReuseAddress, backlog: i32) -> io::Result<TcpListener> {
    let protocol = Tcp::of(&endpoint);
    let socket = Socket::new(protocol.domain(), Type::STREAM, Some(protocol.protocol()))?;
    reuse.apply(&socket)?;
    socket.bind(&endpoint.into())?;
    socket.listen(backlog)?;
    tracing::debug!(%endpoint, backlog, reuse = reuse.value(), "listening");
    Ok(socket.into())
}
