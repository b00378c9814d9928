//! Common interface of the things handlers can be submitted to.

use crate::context::ContextHandle;
use crate::strand::Strand;

/// Something that runs handlers on an event loop.
///
/// Implemented by the context itself and by `Strand`, which adds mutual
/// exclusion between its handlers.
pub trait Executor: Clone + Send + Sync + 'static {
    /// The context whose `run` threads execute the handlers.
    fn context(&self) -> &ContextHandle;

    /// Queue `handler` for later execution. Never runs inline.
    fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static;

    /// Run `handler` inline when allowed, otherwise queue it.
    fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static;

    fn running_in_this_thread(&self) -> bool;
}

impl Executor for ContextHandle {
    fn context(&self) -> &ContextHandle {
        self
    }

    fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        ContextHandle::post(self, handler);
    }

    fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        ContextHandle::dispatch(self, handler);
    }

    fn running_in_this_thread(&self) -> bool {
        ContextHandle::running_in_this_thread(self)
    }
}

impl Executor for Strand {
    fn context(&self) -> &ContextHandle {
        Strand::context(self)
    }

    fn post<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        Strand::post(self, handler);
    }

    fn dispatch<F>(&self, handler: F)
    where
        F: FnOnce() + Send + 'static,
    {
        Strand::dispatch(self, handler);
    }

    fn running_in_this_thread(&self) -> bool {
        Strand::running_in_this_thread(self)
    }
}

/// Bind `handler` to `executor`: calling the result dispatches `handler`
/// through the executor instead of running it directly.
pub fn bind_executor<E, F>(executor: &E, handler: F) -> impl FnOnce() + Send + 'static
where
    E: Executor,
    F: FnOnce() + Send + 'static,
{
    let executor = executor.clone();
    move || executor.dispatch(handler)
}
