use std::io;

use crate::config::ConfigurationError;

/// A Result alias where the Err case is `mplex_io::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the event loop, timers and the resolver.
///
/// These are handed to completion handlers or returned from the
/// synchronous calls; the loop itself never swallows them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operation was cancelled before it could complete.
    #[error("operation aborted")]
    OperationAborted,

    /// The host name could not be turned into any address.
    #[error("host not found: {host}")]
    HostNotFound { host: String },

    /// The service name is neither numeric nor a known service.
    #[error("service not found: {service}")]
    ServiceNotFound { service: String },

    /// The lookup backend reported a failure.
    #[error("name resolution for {host} failed")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    /// The lookup did not finish within the configured timeout.
    #[error("name resolution for {host} timed out")]
    TimedOut { host: String },

    /// The reactor runtime could not be started.
    #[error("reactor failed to start")]
    Reactor(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigurationError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
