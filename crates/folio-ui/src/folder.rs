//! Folder identity and the opaque dragged-item handle.

use std::fmt;
use std::sync::Arc;

/// Identifier assigned by the storage collaborator. Unique per folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub u32);

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "folder#{}", self.0)
    }
}

/// A named container of bookmarked items.
///
/// Owned by storage. A rename produces a new `Folder` value that replaces the
/// old one wholesale; instances are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: FolderId,
    name: String,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> FolderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value storage hands back after a rename.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(self.id, name)
    }
}

/// Opaque handle to a host item (an "ingredient").
///
/// Only identity matters: two handles are equal when the host gave them the
/// same unique key. Clones share the key allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef(Arc<str>);

impl ItemRef {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(Arc::from(key.as_ref()))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemRef {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
