//! Content panel stand-in.

use std::sync::Arc;

use folio_ui::{ContentPanel, Folder, FolderId, ItemRef, Rect};
use parking_lot::Mutex;

/// Records a panel call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCall {
    Refresh {
        folder: Option<FolderId>,
        force_reload: bool,
    },
    AcceptDrop {
        item: ItemRef,
    },
}

#[derive(Debug)]
struct Inner {
    showing: Option<FolderId>,
    rect: Option<Rect<i32>>,
    accepts_drops: bool,
    dropped: Vec<ItemRef>,
    calls: Vec<PanelCall>,
}

/// A panel that is visible exactly while it shows a folder.
#[derive(Debug, Clone)]
pub struct MockPanel {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPanel {
    /// Panel occupying `(0, 100, 200, 100)` that accepts every drop.
    pub fn new() -> Self {
        Self::with_rect(Rect::new(0, 100, 200, 100))
    }

    pub fn with_rect(rect: Rect<i32>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                showing: None,
                rect: Some(rect),
                accepts_drops: true,
                dropped: Vec::new(),
                calls: Vec::new(),
            })),
        }
    }

    pub fn set_rect(&self, rect: Option<Rect<i32>>) {
        self.inner.lock().rect = rect;
    }

    pub fn set_accepts_drops(&self, accepts: bool) {
        self.inner.lock().accepts_drops = accepts;
    }

    pub fn showing(&self) -> Option<FolderId> {
        self.inner.lock().showing
    }

    pub fn dropped(&self) -> Vec<ItemRef> {
        self.inner.lock().dropped.clone()
    }

    pub fn calls(&self) -> Vec<PanelCall> {
        self.inner.lock().calls.clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, PanelCall::Refresh { .. }))
            .count()
    }

    pub fn last_refresh(&self) -> Option<PanelCall> {
        self.inner
            .lock()
            .calls
            .iter()
            .rev()
            .find(|c| matches!(c, PanelCall::Refresh { .. }))
            .cloned()
    }
}

impl ContentPanel for MockPanel {
    fn refresh(&mut self, folder: Option<&Folder>, force_reload: bool) {
        let mut inner = self.inner.lock();
        let id = folder.map(Folder::id);
        inner.calls.push(PanelCall::Refresh {
            folder: id,
            force_reload,
        });
        inner.showing = id;
    }

    fn is_visible(&self) -> bool {
        self.inner.lock().showing.is_some()
    }

    fn bounding_rect(&self) -> Option<Rect<i32>> {
        let inner = self.inner.lock();
        inner.showing.and(inner.rect)
    }

    fn accept_drop(&mut self, item: &ItemRef) -> bool {
        let mut inner = self.inner.lock();
        inner.calls.push(PanelCall::AcceptDrop { item: item.clone() });
        if inner.accepts_drops {
            inner.dropped.push(item.clone());
        }
        inner.accepts_drops
    }
}
