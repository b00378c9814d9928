//! Serialized execution on top of an event loop
//!
//! A strand holds its own FIFO of handlers and keeps at most one of them
//! scheduled on the context at a time. However many threads call `run`,
//! two handlers of the same strand never execute concurrently.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::context::ContextHandle;
use crate::context::call_stack::{self, Frame};
use crate::context::scheduler::Job;

#[derive(Default)]
struct State {
    /// A handler of this strand is scheduled or running.
    locked: bool,
    waiting: VecDeque<Job>,
}

struct Inner {
    state: Mutex<State>,
}

/// Serializing executor. Clones refer to the same strand.
#[derive(Clone)]
pub struct Strand {
    context: ContextHandle,
    inner: Arc<Inner>,
}

impl Strand {
    pub fn new(context: &ContextHandle) -> Self {
        Self {
            context: context.clone(),
            inner: Arc::new(Inner {
                state: Mutex::new(State::default()),
            }),
        }
    }

    #[must_use]
    pub fn context(&self) -> &ContextHandle {
        &self.context
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn key(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    /// Whether the calling thread is executing a handler of this strand.
    #[must_use]
    pub fn running_in_this_thread(&self) -> bool {
        call_stack::contains(self.key())
    }

    /// Queue `handler` behind every handler already in the strand.
    pub fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.lock();
        state.waiting.push_back(Box::new(handler));
        let idle = !state.locked;
        state.locked = true;
        drop(state);
        if idle {
            self.schedule();
        }
    }

    /// Run `handler` inline when that cannot break mutual exclusion,
    /// otherwise queue it.
    ///
    /// Inline execution happens when the caller is already inside this
    /// strand, or is inside the context's `run` while the strand is idle.
    pub fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.running_in_this_thread() {
            handler();
            return;
        }
        if self.context.running_in_this_thread() && self.try_acquire() {
            let _release = Release(self);
            let _frame = Frame::enter(self.key());
            handler();
            return;
        }
        self.post(handler);
    }

    /// Wrap `handler` so that calling the result dispatches it through this
    /// strand.
    pub fn wrap<F>(&self, handler: F) -> impl FnOnce() + Send + 'static
    where
        F: FnOnce() + Send + 'static,
    {
        let strand = self.clone();
        move || strand.dispatch(handler)
    }

    /// `wrap` for completion handlers taking one argument.
    pub fn wrap_with<A, F>(&self, handler: F) -> impl FnOnce(A) + Send + 'static
    where
        A: Send + 'static,
        F: FnOnce(A) + Send + 'static,
    {
        let strand = self.clone();
        move |arg| strand.dispatch(move || handler(arg))
    }

    fn try_acquire(&self) -> bool {
        let mut state = self.lock();
        if state.locked {
            return false;
        }
        state.locked = true;
        true
    }

    fn schedule(&self) {
        let turn = Turn(Some(self.clone()));
        self.context.post(move || turn.run());
    }

    fn run_next(&self) {
        let job = self.lock().waiting.pop_front();
        let _release = Release(self);
        if let Some(job) = job {
            let _frame = Frame::enter(self.key());
            job();
        }
    }
}

/// The strand's slot in the context queue. If the context destroys it
/// without running it, the handlers waiting behind it are destroyed too.
struct Turn(Option<Strand>);

impl Turn {
    fn run(mut self) {
        if let Some(strand) = self.0.take() {
            strand.run_next();
        }
    }
}

impl Drop for Turn {
    fn drop(&mut self) {
        if let Some(strand) = self.0.take() {
            let abandoned = {
                let mut state = strand.lock();
                state.locked = false;
                std::mem::take(&mut state.waiting)
            };
            drop(abandoned);
        }
    }
}

/// Hands the strand to its next waiting handler, or unlocks it. Runs on
/// unwind too, so a panicking handler does not wedge the strand.
struct Release<'a>(&'a Strand);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            tracing::warn!("strand handler panicked; continuing with the next handler");
        }
        let mut state = self.0.lock();
        if state.waiting.is_empty() {
            state.locked = false;
        } else {
            drop(state);
            self.0.schedule();
        }
    }
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Strand")
            .field("locked", &state.locked)
            .field("waiting", &state.waiting.len())
            .finish()
    }
}
