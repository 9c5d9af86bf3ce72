//! Follow-up actions requested by event listeners.
//!
//! Listeners run while the coordinator is mid-operation and cannot call back
//! into it. They push onto a [`DeferredQueue`] instead, and the coordinator
//! drains the queue at the start of the next tick.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::folder::FolderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Activate the button bound to this folder, if it still exists.
    Activate(FolderId),
    /// Deactivate whatever is active.
    Deactivate,
    /// Reload the folder list from storage.
    Reload,
}

/// Cloneable handle onto the pending actions.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    inner: Rc<RefCell<VecDeque<DeferredAction>>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, action: DeferredAction) {
        self.inner.borrow_mut().push_back(action);
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Take everything queued so far. Actions pushed while the result is being
    /// processed wait for the next drain.
    pub fn drain(&self) -> Vec<DeferredAction> {
        self.inner.borrow_mut().drain(..).collect()
    }
}
