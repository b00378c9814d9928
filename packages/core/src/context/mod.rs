//! The event loop
//!
//! `IoContext` is a queue of handlers plus a count of outstanding work.
//! Any number of threads may call [`ContextHandle::run`]; each picks handlers
//! off the queue in FIFO order until the context is stopped. The context
//! stops itself once no work is left, which is why a fresh `run` after
//! running dry needs [`ContextHandle::restart`] first.
//!
//! Timer waits and name lookups are driven by a tokio runtime started on
//! first use. Their completion handlers are queued back here, so user code
//! only ever runs on threads that called `run`.
//!
//! The [`IoContext`] owns the loop. Handlers, strands, timers and resolvers
//! hold a [`ContextHandle`] instead. Dropping the `IoContext` shuts the loop
//! down: handlers that never ran are destroyed, pending operations are
//! abandoned and the reactor runtime is stopped, even while handles to it
//! are still queued inside it.

use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub(crate) mod call_stack;
mod reactor;
pub(crate) mod scheduler;
mod work;

pub use work::WorkGuard;

use self::reactor::Reactor;
use self::scheduler::{Scheduler, Wait};
use crate::config::{ConfigurationValidator, IoConfig};
use crate::error::Result;
use crate::telemetry::ContextStats;

/// Owner of an event loop.
///
/// Dereferences to its [`ContextHandle`], so every loop operation is
/// available directly. Threads that call `run` and handlers that need the
/// loop take a handle with [`IoContext::handle`].
pub struct IoContext {
    handle: ContextHandle,
}

impl Default for IoContext {
    fn default() -> Self {
        Self::new()
    }
}

impl IoContext {
    /// Create a context with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handle: ContextHandle::build(IoConfig::default()),
        }
    }

    /// Create a context from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is out of range.
    pub fn with_config(config: IoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            handle: ContextHandle::build(config),
        })
    }

    /// A new handle to this loop.
    #[must_use]
    pub fn handle(&self) -> ContextHandle {
        self.handle.clone()
    }
}

impl Deref for IoContext {
    type Target = ContextHandle;

    fn deref(&self) -> &ContextHandle {
        &self.handle
    }
}

impl Drop for IoContext {
    fn drop(&mut self) {
        // Completions arriving from now on are dropped, so mark the
        // scheduler before stopping the reactor that delivers them.
        self.handle.scheduler.shutdown();
        self.handle.reactor.shutdown();
    }
}

impl fmt::Debug for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoContext")
            .field("stopped", &self.stopped())
            .field("stats", &self.stats().snapshot())
            .finish()
    }
}

/// Handle to an event loop. Clones share the same loop.
///
/// A handle does not keep the loop alive: once its `IoContext` is dropped,
/// `run` returns immediately and posted handlers are destroyed unrun.
#[derive(Clone)]
pub struct ContextHandle {
    scheduler: Arc<Scheduler>,
    reactor: Arc<Reactor>,
    config: Arc<IoConfig>,
}

impl ContextHandle {
    fn build(config: IoConfig) -> Self {
        Self {
            scheduler: Arc::new(Scheduler::new()),
            reactor: Arc::new(Reactor::new(config.reactor.clone())),
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &IoConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &ContextStats {
        self.scheduler.stats()
    }

    /// Queue `handler` to run on a thread inside `run`. Never runs inline.
    pub fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.scheduler.post(Box::new(handler));
    }

    /// Run `handler` immediately if the calling thread is inside this
    /// context's `run`, otherwise queue it like `post`.
    pub fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.running_in_this_thread() {
            handler();
        } else {
            self.post(handler);
        }
    }

    /// Run handlers until the context is stopped or out of work.
    ///
    /// Returns the number of handlers executed.
    pub fn run(&self) -> usize {
        self.drain(Wait::Block, usize::MAX)
    }

    /// Run at most one handler, blocking until one is available.
    pub fn run_one(&self) -> usize {
        self.drain(Wait::Block, 1)
    }

    /// Like `run`, but returns once `duration` has elapsed.
    pub fn run_for(&self, duration: Duration) -> usize {
        let deadline = crate::timer::deadline_after(duration);
        self.drain(Wait::Until(deadline), usize::MAX)
    }

    pub fn run_until(&self, deadline: Instant) -> usize {
        self.drain(Wait::Until(deadline), usize::MAX)
    }

    /// Run every handler that is ready without blocking.
    pub fn poll(&self) -> usize {
        self.drain(Wait::Poll, usize::MAX)
    }

    pub fn poll_one(&self) -> usize {
        self.drain(Wait::Poll, 1)
    }

    fn drain(&self, wait: Wait, limit: usize) -> usize {
        let mut executed = 0;
        while executed < limit && self.scheduler.run_one(wait) {
            executed += 1;
        }
        executed
    }

    /// Make every `run` call return as soon as possible.
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    #[must_use]
    pub fn stopped(&self) -> bool {
        self.scheduler.stopped()
    }

    /// Clear the stopped state so `run` may be called again.
    pub fn restart(&self) {
        self.scheduler.restart();
    }

    /// Whether the calling thread is currently executing a handler of this
    /// context.
    #[must_use]
    pub fn running_in_this_thread(&self) -> bool {
        call_stack::contains(self.scheduler.key())
    }

    pub fn work_guard(&self) -> WorkGuard {
        WorkGuard::new(self)
    }

    pub(crate) fn scheduler(&self) -> &Arc<Scheduler> {
        &self.scheduler
    }

    pub(crate) fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        self.reactor.block_on(future)
    }

    /// Start an asynchronous operation on the reactor.
    ///
    /// The operation counts as outstanding work until `handler` has run on
    /// the loop. `handler` is invoked exactly once, never inline.
    pub(crate) fn spawn_async_op<Op, T, H>(&self, op: Op, handler: H)
    where
        Op: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
        H: FnOnce(Result<T>) + Send + 'static,
    {
        let scheduler = Arc::clone(&self.scheduler);
        scheduler.stats().record_async_start();
        scheduler.work_started();

        match self.reactor.handle() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let result = op.await;
                    if matches!(&result, Err(e) if e.is_operation_aborted()) {
                        scheduler.stats().record_abort();
                    }
                    scheduler.complete(Box::new(move || handler(result)));
                });
            }
            Err(e) => scheduler.complete(Box::new(move || handler(Err(e)))),
        }
    }
}

impl fmt::Debug for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHandle")
            .field("stopped", &self.stopped())
            .field("stats", &self.stats().snapshot())
            .finish()
    }
}
