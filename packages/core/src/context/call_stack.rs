//! Per-thread record of which contexts and strands are currently executing
//! handlers, so `dispatch` can tell when it may run inline.

use std::cell::RefCell;

thread_local! {
    static ACTIVE: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks `key` as active on this thread until dropped.
pub(crate) struct Frame {
    key: usize,
}

impl Frame {
    pub(crate) fn enter(key: usize) -> Self {
        ACTIVE.with(|active| active.borrow_mut().push(key));
        Self { key }
    }
}

impl Drop for Frame {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            let mut active = active.borrow_mut();
            if let Some(pos) = active.iter().rposition(|k| *k == self.key) {
                active.remove(pos);
            }
        });
    }
}

pub(crate) fn contains(key: usize) -> bool {
    ACTIVE.with(|active| active.borrow().contains(&key))
}
