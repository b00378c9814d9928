//! Handler queue and outstanding-work accounting shared by every handle to
//! one `IoContext`.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use super::call_stack::Frame;
use crate::telemetry::ContextStats;

pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// How long `next_job` may block waiting for a handler.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Wait {
    Block,
    Poll,
    Until(Instant),
}

#[derive(Default)]
struct State {
    queue: VecDeque<Job>,
    /// Queued handlers + pending async operations + live work guards.
    outstanding: usize,
    stopped: bool,
    /// The owning `IoContext` is gone; nothing runs or queues any more.
    shut_down: bool,
}

pub(crate) struct Scheduler {
    state: Mutex<State>,
    ready: Condvar,
    stats: ContextStats,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            ready: Condvar::new(),
            stats: ContextStats::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn stats(&self) -> &ContextStats {
        &self.stats
    }

    /// Identity of this scheduler for the per-thread call stack.
    pub(crate) fn key(&self) -> usize {
        std::ptr::from_ref(self) as usize
    }

    /// Queue a new handler. It counts as outstanding work until it has run.
    pub(crate) fn post(&self, job: Job) {
        let mut state = self.lock();
        if state.shut_down {
            drop(state);
            drop(job);
            return;
        }
        self.stats.record_post();
        state.outstanding += 1;
        state.queue.push_back(job);
        drop(state);
        self.ready.notify_one();
    }

    /// Queue the completion handler of an operation previously registered
    /// with `work_started`; the operation's unit of work moves to the handler.
    pub(crate) fn complete(&self, job: Job) {
        let mut state = self.lock();
        if state.shut_down {
            drop(state);
            drop(job);
            return;
        }
        self.stats.record_post();
        state.queue.push_back(job);
        drop(state);
        self.ready.notify_one();
    }

    pub(crate) fn work_started(&self) {
        self.lock().outstanding += 1;
    }

    pub(crate) fn work_finished(&self) {
        let mut state = self.lock();
        state.outstanding = state.outstanding.saturating_sub(1);
        if state.outstanding == 0 {
            state.stopped = true;
            drop(state);
            tracing::trace!("io context ran out of work");
            self.ready.notify_all();
        }
    }

    pub(crate) fn stop(&self) {
        self.lock().stopped = true;
        tracing::debug!("io context stopped");
        self.ready.notify_all();
    }

    /// Stop for good and destroy every handler that has not run.
    ///
    /// Handlers are dropped outside the lock: their captures may post,
    /// release work or drop other handles to this scheduler.
    pub(crate) fn shutdown(&self) {
        let mut state = self.lock();
        state.shut_down = true;
        state.stopped = true;
        state.outstanding = 0;
        let abandoned = std::mem::take(&mut state.queue);
        drop(state);
        self.ready.notify_all();
        if !abandoned.is_empty() {
            tracing::debug!(abandoned = abandoned.len(), "io context shut down");
        }
        drop(abandoned);
    }

    pub(crate) fn stopped(&self) -> bool {
        self.lock().stopped
    }

    pub(crate) fn restart(&self) {
        self.lock().stopped = false;
        tracing::debug!("io context restarted");
    }

    fn next_job(&self, wait: Wait) -> Option<Job> {
        let mut state = self.lock();
        loop {
            if state.stopped || state.shut_down {
                return None;
            }
            if let Some(job) = state.queue.pop_front() {
                return Some(job);
            }
            if state.outstanding == 0 {
                state.stopped = true;
                drop(state);
                self.ready.notify_all();
                return None;
            }
            state = match wait {
                Wait::Poll => return None,
                Wait::Block => self.ready.wait(state).unwrap_or_else(PoisonError::into_inner),
                Wait::Until(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    self.ready
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }
    }

    /// Run at most one handler. Returns false when nothing ran.
    ///
    /// A panicking handler still releases its unit of work before the panic
    /// leaves this call.
    pub(crate) fn run_one(&self, wait: Wait) -> bool {
        let Some(job) = self.next_job(wait) else {
            return false;
        };
        let _frame = Frame::enter(self.key());
        let _finish = Finish(self);
        job();
        true
    }
}

struct Finish<'a>(&'a Scheduler);

impl Drop for Finish<'_> {
    fn drop(&mut self) {
        self.0.stats.record_execution();
        self.0.work_finished();
    }
}
