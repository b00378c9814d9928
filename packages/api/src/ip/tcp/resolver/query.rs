use mplex_io::ResolveFlags;

/// A (host, service) pair to resolve. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    host: String,
    service: String,
    flags: ResolveFlags,
}

impl Query {
    pub fn new(host: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            service: service.into(),
            flags: ResolveFlags::default(),
        }
    }

    /// Query for a local endpoint to bind: empty host, passive lookup.
    pub fn passive(service: impl Into<String>) -> Self {
        Self::new("", service).with_flags(ResolveFlags::passive())
    }

    #[must_use]
    pub fn with_flags(self, flags: ResolveFlags) -> Self {
        Self { flags, ..self }
    }

    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub fn flags(&self) -> ResolveFlags {
        self.flags
    }
}
