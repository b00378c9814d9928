//! Monotonic-clock timers
//!
//! A `SteadyTimer` stores an absolute expiry. `async_wait` completes on the
//! context once the expiry is reached; changing the expiry, calling
//! `cancel`, or dropping the timer aborts waits that are still pending.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod duration;

pub use duration::{deadline_after, is_neg, milliseconds, signed_between};

use crate::context::ContextHandle;
use crate::error::Result;
use crate::pending::{PendingOps, cancellable};

pub struct SteadyTimer {
    context: ContextHandle,
    expiry: Instant,
    pending: Arc<PendingOps>,
}

impl SteadyTimer {
    /// A timer that has already expired.
    pub fn new(context: &ContextHandle) -> Self {
        Self::with_expiry_at(context, Instant::now())
    }

    pub fn with_expiry_at(context: &ContextHandle, expiry: Instant) -> Self {
        Self {
            context: context.clone(),
            expiry,
            pending: Arc::new(PendingOps::default()),
        }
    }

    pub fn with_expiry_after(context: &ContextHandle, duration: Duration) -> Self {
        Self::with_expiry_at(context, deadline_after(duration))
    }

    #[must_use]
    pub fn context(&self) -> &ContextHandle {
        &self.context
    }

    #[must_use]
    pub fn expiry(&self) -> Instant {
        self.expiry
    }

    /// Set an absolute expiry. Pending waits are aborted; returns how many.
    pub fn expires_at(&mut self, expiry: Instant) -> usize {
        let cancelled = self.cancel();
        self.expiry = expiry;
        cancelled
    }

    /// Set the expiry relative to now. Pending waits are aborted; returns
    /// how many.
    pub fn expires_after(&mut self, duration: Duration) -> usize {
        self.expires_at(deadline_after(duration))
    }

    /// Abort every pending wait with `OperationAborted`.
    pub fn cancel(&self) -> usize {
        let cancelled = self.pending.cancel_all();
        if cancelled > 0 {
            tracing::trace!(cancelled, "timer waits cancelled");
        }
        cancelled
    }

    /// Abort the oldest pending wait.
    pub fn cancel_one(&self) -> usize {
        self.pending.cancel_one()
    }

    /// Number of waits not yet completed or cancelled.
    #[must_use]
    pub fn pending_waits(&self) -> usize {
        self.pending.len()
    }

    /// Block the calling thread until the expiry.
    ///
    /// # Errors
    ///
    /// Never fails today; the `Result` mirrors `async_wait`.
    pub fn wait(&self) -> Result<()> {
        if let Some(left) = self.expiry.checked_duration_since(Instant::now()) {
            std::thread::sleep(left);
        }
        Ok(())
    }

    /// Call `handler` on the context once the timer expires.
    ///
    /// `handler` receives `Ok(())` on expiry or `Err(OperationAborted)` if
    /// the wait was cancelled first. It is invoked exactly once, from a
    /// thread running the context, never from inside this call.
    pub fn async_wait<H>(&self, handler: H)
    where
        H: FnOnce(Result<()>) + Send + 'static,
    {
        let registration = self.pending.register();
        let deadline = tokio::time::Instant::from_std(self.expiry);
        let op = cancellable(registration, async move {
            tokio::time::sleep_until(deadline).await;
            Ok(())
        });
        self.context.spawn_async_op(op, handler);
    }
}

impl Drop for SteadyTimer {
    fn drop(&mut self) {
        self.pending.cancel_all();
    }
}

impl fmt::Debug for SteadyTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SteadyTimer")
            .field("expiry", &self.expiry)
            .field("pending_waits", &self.pending_waits())
            .finish()
    }
}
