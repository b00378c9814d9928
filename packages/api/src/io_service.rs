//! `io_service` and its nested `strand` and `work` types

use std::time::Duration;

use mplex_io::{ContextHandle, IoConfig, IoContext, Result, WorkGuard};

/// The event loop under its legacy name.
///
/// Owns the loop: dropping it destroys handlers that never ran. Other threads
/// and handlers reach the loop through [`IoService::handle`].
#[derive(Debug, Default)]
pub struct IoService {
    context: IoContext,
}

impl IoService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is out of range.
    pub fn with_config(config: IoConfig) -> Result<Self> {
        IoContext::with_config(config).map(Self::from)
    }

    #[must_use]
    pub fn as_context(&self) -> &IoContext {
        &self.context
    }

    /// A cloneable handle to the same loop.
    #[must_use]
    pub fn handle(&self) -> ContextHandle {
        self.context.handle()
    }

    /// Queue `handler` for later execution on the loop.
    pub fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.context.post(handler);
    }

    pub fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.context.dispatch(handler);
    }

    /// Old name of `restart`: make a stopped loop runnable again.
    pub fn reset(&self) {
        self.context.restart();
    }

    pub fn restart(&self) {
        self.context.restart();
    }

    #[must_use]
    pub fn run(&self) -> usize {
        self.context.run()
    }

    #[must_use]
    pub fn run_one(&self) -> usize {
        self.context.run_one()
    }

    #[must_use]
    pub fn run_for(&self, duration: Duration) -> usize {
        self.context.run_for(duration)
    }

    #[must_use]
    pub fn poll(&self) -> usize {
        self.context.poll()
    }

    #[must_use]
    pub fn poll_one(&self) -> usize {
        self.context.poll_one()
    }

    pub fn stop(&self) {
        self.context.stop();
    }

    #[must_use]
    pub fn stopped(&self) -> bool {
        self.context.stopped()
    }

    #[must_use]
    pub fn running_in_this_thread(&self) -> bool {
        self.context.running_in_this_thread()
    }
}

impl From<IoContext> for IoService {
    fn from(context: IoContext) -> Self {
        Self { context }
    }
}

/// `io_service::strand`: handlers wrapped by the same strand never run
/// concurrently.
#[derive(Debug, Clone)]
pub struct Strand {
    inner: mplex_io::Strand,
}

impl Strand {
    #[must_use]
    pub fn new(io: &IoService) -> Self {
        Self {
            inner: mplex_io::Strand::new(io.as_context()),
        }
    }

    #[must_use]
    pub fn wrap<F>(&self, handler: F) -> impl FnOnce() + Send + 'static
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.wrap(handler)
    }

    #[must_use]
    pub fn wrap_with<A, F>(&self, handler: F) -> impl FnOnce(A) + Send + 'static
    where
        A: Send + 'static,
        F: FnOnce(A) + Send + 'static,
    {
        self.inner.wrap_with(handler)
    }

    pub fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.post(handler);
    }

    pub fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.dispatch(handler);
    }

    #[must_use]
    pub fn running_in_this_thread(&self) -> bool {
        self.inner.running_in_this_thread()
    }

    #[must_use]
    pub fn as_strand(&self) -> &mplex_io::Strand {
        &self.inner
    }
}

/// `io_service::work`: keeps `run` from returning while alive.
#[derive(Debug)]
#[must_use = "the loop may stop as soon as the work is dropped"]
pub struct Work {
    _guard: WorkGuard,
}

impl Work {
    pub fn new(io: &IoService) -> Self {
        Self {
            _guard: io.as_context().work_guard(),
        }
    }
}
