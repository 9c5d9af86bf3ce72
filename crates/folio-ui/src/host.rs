//! Collaborators the coordinator talks to but does not implement.

use folio_core::geometry::Rect;

use crate::error::FolderResult;
use crate::folder::{Folder, FolderId, ItemRef};

/// Durable folder storage.
///
/// Implementations own the folders; the coordinator only keeps copies.
pub trait FolderStorage {
    /// All folders in display order. Returns an empty list when nothing is
    /// stored.
    fn load_all(&self) -> Vec<Folder>;

    /// Create a folder. `name` has already been validated.
    fn create(&mut self, name: &str) -> FolderResult<Folder>;

    fn remove(&mut self, id: FolderId) -> FolderResult<()>;

    /// Persist which folder was last active.
    fn set_last_active_id(&mut self, id: Option<FolderId>);

    /// Replace a folder's name, returning the new value.
    fn rename(&mut self, id: FolderId, name: &str) -> FolderResult<Folder>;

    /// Items bookmarked in a folder, in display order.
    fn items(&self, id: FolderId) -> Vec<ItemRef>;

    /// Add a dropped item to a folder. Returns `false` if it was already there.
    fn add_item(&mut self, id: FolderId, item: &ItemRef) -> FolderResult<bool>;
}

/// The panel showing the active folder's contents.
pub trait ContentPanel {
    /// Show `folder`, or hide the panel for `None`. `force_reload` discards
    /// whatever the panel cached for the previous folder.
    fn refresh(&mut self, folder: Option<&Folder>, force_reload: bool);

    fn is_visible(&self) -> bool;

    fn bounding_rect(&self) -> Option<Rect<i32>>;

    /// Handle an item dropped onto the panel. Returns `true` if accepted.
    fn accept_drop(&mut self, item: &ItemRef) -> bool;
}
