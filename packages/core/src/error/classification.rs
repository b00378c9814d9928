use serde::{Deserialize, Serialize};

use super::types::Error;

/// Portable error condition, comparable across error sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    OperationAborted,
    HostNotFound,
    ServiceNotFound,
    TimedOut,
    Reactor,
    InvalidConfig,
    Io,
}

impl Error {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OperationAborted => ErrorKind::OperationAborted,
            Error::HostNotFound { .. } | Error::Resolve { .. } => ErrorKind::HostNotFound,
            Error::ServiceNotFound { .. } => ErrorKind::ServiceNotFound,
            Error::TimedOut { .. } => ErrorKind::TimedOut,
            Error::Reactor(_) => ErrorKind::Reactor,
            Error::Config(_) => ErrorKind::InvalidConfig,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns true if the operation was cancelled.
    #[must_use]
    pub fn is_operation_aborted(&self) -> bool {
        matches!(self, Error::OperationAborted)
    }

    /// Returns true if a host name could not be resolved.
    #[must_use]
    pub fn is_host_not_found(&self) -> bool {
        self.kind() == ErrorKind::HostNotFound
    }

    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::TimedOut { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_failures_classify_as_host_not_found() {
        let err = Error::Resolve {
            host: "example.invalid".to_string(),
            source: std::io::Error::other("lookup failed"),
        };
        assert_eq!(err.kind(), ErrorKind::HostNotFound);
        assert!(err.is_host_not_found());
        assert!(!err.is_operation_aborted());
    }

    #[test]
    fn aborted_is_its_own_kind() {
        assert_eq!(Error::OperationAborted.kind(), ErrorKind::OperationAborted);
        assert!(Error::OperationAborted.is_operation_aborted());
    }
}
