use std::io;

use super::types::Error;

/// Creates an `Error` for a cancelled operation.
#[must_use]
pub fn operation_aborted() -> Error {
    Error::OperationAborted
}

/// Creates an `Error` for a host with no addresses.
pub fn host_not_found(host: impl Into<String>) -> Error {
    Error::HostNotFound { host: host.into() }
}

/// Creates an `Error` for an unknown service name.
pub fn service_not_found(service: impl Into<String>) -> Error {
    Error::ServiceNotFound {
        service: service.into(),
    }
}

/// Creates an `Error` for a failed lookup.
pub fn resolve(host: impl Into<String>, source: io::Error) -> Error {
    Error::Resolve {
        host: host.into(),
        source,
    }
}

pub fn timed_out(host: impl Into<String>) -> Error {
    Error::TimedOut { host: host.into() }
}
