//! Keep-alive token for an event loop

use std::fmt;
use std::sync::Arc;

use super::ContextHandle;
use super::scheduler::Scheduler;

/// Keeps `ContextHandle::run` from returning for lack of work while held.
///
/// The work is released when the guard is dropped or `reset` is called.
#[must_use = "the context may stop as soon as the guard is dropped"]
pub struct WorkGuard {
    scheduler: Option<Arc<Scheduler>>,
}

impl WorkGuard {
    pub fn new(context: &ContextHandle) -> Self {
        let scheduler = Arc::clone(context.scheduler());
        scheduler.work_started();
        Self {
            scheduler: Some(scheduler),
        }
    }

    /// Whether the guard still holds its unit of work.
    #[must_use]
    pub fn owns_work(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Release the work early. Further calls do nothing.
    pub fn reset(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.work_finished();
        }
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.reset();
    }
}

impl fmt::Debug for WorkGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkGuard")
            .field("owns_work", &self.owns_work())
            .finish()
    }
}
