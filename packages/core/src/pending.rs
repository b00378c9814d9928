//! Registry of in-flight asynchronous operations that can be cancelled.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::error::{self, Result};

#[derive(Debug, Default)]
pub(crate) struct PendingOps {
    next_id: AtomicU64,
    waiters: Mutex<BTreeMap<u64, oneshot::Sender<()>>>,
}

/// Claim on one registered operation. Dropping it forgets the operation.
pub(crate) struct Registration {
    ops: Arc<PendingOps>,
    id: u64,
}

impl PendingOps {
    fn lock(&self) -> MutexGuard<'_, BTreeMap<u64, oneshot::Sender<()>>> {
        self.waiters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn register(self: &Arc<Self>) -> (Registration, oneshot::Receiver<()>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = oneshot::channel();
        self.lock().insert(id, tx);
        (
            Registration {
                ops: Arc::clone(self),
                id,
            },
            rx,
        )
    }

    /// Abort every registered operation. Returns how many were aborted.
    pub(crate) fn cancel_all(&self) -> usize {
        let waiters = std::mem::take(&mut *self.lock());
        let count = waiters.len();
        for (_, tx) in waiters {
            let _ = tx.send(());
        }
        count
    }

    /// Abort the oldest registered operation, if any.
    pub(crate) fn cancel_one(&self) -> usize {
        match self.lock().pop_first() {
            Some((_, tx)) => {
                let _ = tx.send(());
                1
            }
            None => 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }
}

impl Registration {
    /// Take the operation out of the registry. Returns false if a cancel
    /// got there first.
    fn claim(&self) -> bool {
        self.ops.lock().remove(&self.id).is_some()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.ops.lock().remove(&self.id);
    }
}

/// Run `op` unless the registration is cancelled first.
///
/// Whoever removes the registry entry decides the outcome, so an operation
/// counted by `cancel_all` always reports `OperationAborted`.
pub(crate) async fn cancellable<T, Op>(
    (registration, cancelled): (Registration, oneshot::Receiver<()>),
    op: Op,
) -> Result<T>
where
    Op: Future<Output = Result<T>>,
{
    tokio::select! {
        result = op => {
            if registration.claim() {
                result
            } else {
                Err(error::operation_aborted())
            }
        }
        _ = cancelled => Err(error::operation_aborted()),
    }
}
