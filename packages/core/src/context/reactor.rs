//! Lazily started tokio runtime that waits on timers and name lookups.
//!
//! Completions are never run here: operations hand their handler back to
//! the scheduler, which runs it on a thread inside `ContextHandle::run`.

use std::future::Future;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::runtime::{Builder, Handle, Runtime};

use crate::config::ReactorConfig;
use crate::error::{Error, Result};

#[derive(Default)]
struct State {
    runtime: Option<Runtime>,
    shut_down: bool,
}

pub(crate) struct Reactor {
    state: Mutex<State>,
    config: ReactorConfig,
}

impl Reactor {
    pub(crate) fn new(config: ReactorConfig) -> Self {
        Self {
            state: Mutex::new(State::default()),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle to the runtime, starting it on first use.
    pub(crate) fn handle(&self) -> Result<Handle> {
        let mut state = self.lock();
        if state.shut_down {
            return Err(Error::Reactor(io::Error::other("reactor has been shut down")));
        }
        if let Some(runtime) = &state.runtime {
            return Ok(runtime.handle().clone());
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .max_blocking_threads(self.config.max_blocking_threads)
            .thread_name(self.config.thread_name.clone())
            .enable_all()
            .build()
            .map_err(|e| {
                tracing::error!("Failed to start reactor runtime: {}", e);
                Error::Reactor(e)
            })?;
        tracing::debug!(workers = self.config.worker_threads, "reactor runtime started");
        let handle = runtime.handle().clone();
        state.runtime = Some(runtime);
        Ok(handle)
    }

    /// Drive `future` to completion on the calling thread.
    ///
    /// Must not be called from inside an asynchronous task.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        Ok(self.handle()?.block_on(future))
    }

    /// Stop the runtime and refuse to start another. Tasks still in flight
    /// are dropped together with the handlers they carry.
    pub(crate) fn shutdown(&self) {
        let runtime = {
            let mut state = self.lock();
            state.shut_down = true;
            state.runtime.take()
        };
        // Outside the lock: dropped tasks may release the last handle to
        // this reactor.
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
            tracing::debug!("reactor runtime shut down");
        }
    }
}

impl Drop for Reactor {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(runtime) = state.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
