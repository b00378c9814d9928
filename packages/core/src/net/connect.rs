//! Connecting to the first reachable endpoint of a resolved list

use std::io;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Try each endpoint in order and return the first connection made,
/// together with the endpoint it went to.
///
/// # Errors
///
/// Returns the error of the last attempt, or `InvalidInput` when there was
/// nothing to try.
pub fn connect_first<I>(
    endpoints: I,
    timeout: Option<Duration>,
) -> io::Result<(TcpStream, SocketAddr)>
where
    I: IntoIterator<Item = SocketAddr>,
{
    let mut last_error = None;
    for endpoint in endpoints {
        let attempt = match timeout {
            Some(limit) => TcpStream::connect_timeout(&endpoint, limit),
            None => TcpStream::connect(endpoint),
        };
        match attempt {
            Ok(stream) => {
                tracing::trace!(%endpoint, "connected");
                return Ok((stream, endpoint));
            }
            Err(e) => {
                tracing::debug!("Failed to connect to {}: {}", endpoint, e);
                last_error = Some(e);
            }
        }
    }
    let error = last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "no endpoints to connect to")
    });
    Err(error)
}
