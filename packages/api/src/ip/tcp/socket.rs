//! `ip::tcp::socket` and `ip::tcp::acceptor`
//!
//! Blocking sockets: enough to connect to what a resolver returned, or to
//! listen with the `socket_base` options.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::time::Duration;

use mplex_io::net::{self, MAX_LISTEN_CONNECTIONS, ReuseAddress};

use super::Endpoint;
use super::resolver::ResolverIterator;
use crate::Result;

/// A connected TCP stream.
#[derive(Debug)]
pub struct Socket {
    stream: TcpStream,
}

impl Socket {
    /// # Errors
    ///
    /// Returns the OS error from `connect`.
    pub fn connect(endpoint: Endpoint) -> Result<Self> {
        Ok(TcpStream::connect(endpoint)?.into())
    }

    /// Connect to the first reachable entry of a resolver iterator, in
    /// order, and report which endpoint answered.
    ///
    /// # Errors
    ///
    /// The error of the last attempt, or an `InvalidInput` I/O error for an
    /// end iterator.
    pub fn connect_any(endpoints: ResolverIterator) -> Result<(Self, Endpoint)> {
        Self::connect_any_timeout(endpoints, None)
    }

    /// `connect_any` with a limit on each attempt.
    ///
    /// # Errors
    ///
    /// See [`Socket::connect_any`].
    pub fn connect_any_timeout(
        endpoints: ResolverIterator,
        timeout: Option<Duration>,
    ) -> Result<(Self, Endpoint)> {
        let endpoints = endpoints.map(|entry| entry.endpoint());
        let (stream, endpoint) = net::connect_first(endpoints, timeout)?;
        Ok((stream.into(), endpoint))
    }

    /// # Errors
    ///
    /// Returns the OS error from `getsockname`.
    pub fn local_endpoint(&self) -> Result<Endpoint> {
        Ok(self.stream.local_addr()?)
    }

    /// # Errors
    ///
    /// Returns the OS error from `getpeername`.
    pub fn remote_endpoint(&self) -> Result<Endpoint> {
        Ok(self.stream.peer_addr()?)
    }

    /// # Errors
    ///
    /// Returns the OS error from `setsockopt`.
    pub fn set_no_delay(&self, no_delay: bool) -> Result<()> {
        Ok(self.stream.set_nodelay(no_delay)?)
    }

    /// # Errors
    ///
    /// Returns the OS error from `shutdown`.
    pub fn shutdown(&self, how: Shutdown) -> Result<()> {
        Ok(self.stream.shutdown(how)?)
    }

    #[must_use]
    pub fn as_std(&self) -> &TcpStream {
        &self.stream
    }

    #[must_use]
    pub fn into_std(self) -> TcpStream {
        self.stream
    }
}

impl From<TcpStream> for Socket {
    fn from(stream: TcpStream) -> Self {
        Self { stream }
    }
}

impl Read for Socket {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream.read(buf)
    }
}

impl Write for Socket {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stream.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stream.flush()
    }
}

/// A listening TCP socket.
#[derive(Debug)]
pub struct Acceptor {
    listener: TcpListener,
}

impl Acceptor {
    /// Listen on `endpoint` with the platform's maximum backlog.
    ///
    /// # Errors
    ///
    /// Returns the OS error from socket creation, `bind` or `listen`.
    pub fn bind(endpoint: Endpoint, reuse: ReuseAddress) -> Result<Self> {
        Self::with_backlog(endpoint, reuse, MAX_LISTEN_CONNECTIONS)
    }

    /// # Errors
    ///
    /// See [`Acceptor::bind`].
    pub fn with_backlog(endpoint: Endpoint, reuse: ReuseAddress, backlog: i32) -> Result<Self> {
        Ok(Self {
            listener: net::listen(endpoint, reuse, backlog)?,
        })
    }

    /// Block until a peer connects.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `accept`.
    pub fn accept(&self) -> Result<(Socket, Endpoint)> {
        let (stream, peer) = self.listener.accept()?;
        Ok((stream.into(), peer))
    }

    /// # Errors
    ///
    /// Returns the OS error from `getsockname`.
    pub fn local_endpoint(&self) -> Result<Endpoint> {
        Ok(self.listener.local_addr()?)
    }

    #[must_use]
    pub fn as_std(&self) -> &TcpListener {
        &self.listener
    }

    #[must_use]
    pub fn into_std(self) -> TcpListener {
        self.listener
    }
}
