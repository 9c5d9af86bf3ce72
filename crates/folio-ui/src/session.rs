//! Selection state that outlives a single coordinator.
//!
//! The host tears down and rebuilds its screens freely. A [`SessionState`] is
//! created once per process by the host glue and shared with every coordinator
//! it constructs, so the active folder survives those rebuilds.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::folder::{FolderId, ItemRef};

/// Shared handle to the durable selection.
pub type SharedSession = Rc<RefCell<SessionState>>;

/// Durable part of the selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Folder that was active when the last coordinator went away.
    pub last_active: Option<FolderId>,
    /// When the selection was last recorded.
    pub last_rebuild: Option<Instant>,
    /// Items of the active folder, kept so a rebuilt panel can draw them
    /// before storage has been queried again.
    pub cached_items: Vec<ItemRef>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn record_activation(&mut self, id: FolderId, items: Vec<ItemRef>, now: Instant) {
        self.last_active = Some(id);
        self.last_rebuild = Some(now);
        self.cached_items = items;
    }

    /// Forget the selection and the cached items.
    pub fn clear_selection(&mut self) {
        self.last_active = None;
        self.cached_items.clear();
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_rebuild = Some(now);
    }

    /// True when a selection exists and was recorded within `window` of `now`.
    pub fn is_within(&self, window: Duration, now: Instant) -> bool {
        match (self.last_active, self.last_rebuild) {
            (Some(_), Some(stamp)) => now.saturating_duration_since(stamp) <= window,
            _ => false,
        }
    }
}
