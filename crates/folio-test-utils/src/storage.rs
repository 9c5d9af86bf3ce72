//! In-memory folder storage.

use std::sync::Arc;

use folio_ui::{Folder, FolderError, FolderId, FolderResult, FolderStorage, ItemRef};
use parking_lot::Mutex;

/// Records a storage call for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    LoadAll,
    Create { name: String },
    Remove { id: FolderId },
    SetLastActive { id: Option<FolderId> },
    Rename { id: FolderId, name: String },
    AddItem { id: FolderId, item: ItemRef },
}

#[derive(Debug, Default)]
struct Inner {
    folders: Vec<(Folder, Vec<ItemRef>)>,
    next_id: u32,
    last_active: Option<FolderId>,
    calls: Vec<StorageCall>,
}

/// Folder storage backed by a `Vec`.
///
/// Names are unique; creating a duplicate name or touching an unknown id
/// fails with [`FolderError::DuplicateOrMissingFolder`]. Ids start at 1.
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MockStorage {
    pub fn new() -> Self {
        let storage = Self::default();
        storage.inner.lock().next_id = 1;
        storage
    }

    pub fn with_folders<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let storage = Self::new();
        {
            let mut inner = storage.inner.lock();
            for name in names {
                let id = FolderId(inner.next_id);
                inner.next_id += 1;
                inner.folders.push((Folder::new(id, name), Vec::new()));
            }
        }
        storage
    }

    /// Remove a folder behind the coordinator's back, as another screen would.
    pub fn remove_external(&self, id: FolderId) {
        self.inner.lock().folders.retain(|(f, _)| f.id() != id);
    }

    pub fn folders(&self) -> Vec<Folder> {
        self.inner.lock().folders.iter().map(|(f, _)| f.clone()).collect()
    }

    pub fn stored_items(&self, id: FolderId) -> Vec<ItemRef> {
        self.items(id)
    }

    pub fn last_active_id(&self) -> Option<FolderId> {
        self.inner.lock().last_active
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.inner.lock().calls.clone()
    }

    pub fn count_calls(&self, pred: impl Fn(&StorageCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }
}

impl FolderStorage for MockStorage {
    fn load_all(&self) -> Vec<Folder> {
        let mut inner = self.inner.lock();
        inner.calls.push(StorageCall::LoadAll);
        inner.folders.iter().map(|(f, _)| f.clone()).collect()
    }

    fn create(&mut self, name: &str) -> FolderResult<Folder> {
        let mut inner = self.inner.lock();
        inner.calls.push(StorageCall::Create {
            name: name.to_string(),
        });
        if inner.folders.iter().any(|(f, _)| f.name() == name) {
            return Err(FolderError::storage(
                None,
                format!("a folder named {:?} already exists", name),
            ));
        }
        if inner.next_id == 0 {
            inner.next_id = 1;
        }
        let folder = Folder::new(FolderId(inner.next_id), name);
        inner.next_id += 1;
        inner.folders.push((folder.clone(), Vec::new()));
        Ok(folder)
    }

    fn remove(&mut self, id: FolderId) -> FolderResult<()> {
        let mut inner = self.inner.lock();
        inner.calls.push(StorageCall::Remove { id });
        let before = inner.folders.len();
        inner.folders.retain(|(f, _)| f.id() != id);
        if inner.folders.len() == before {
            return Err(FolderError::storage(Some(id), "no such folder"));
        }
        Ok(())
    }

    fn set_last_active_id(&mut self, id: Option<FolderId>) {
        let mut inner = self.inner.lock();
        inner.calls.push(StorageCall::SetLastActive { id });
        inner.last_active = id;
    }

    fn rename(&mut self, id: FolderId, name: &str) -> FolderResult<Folder> {
        let mut inner = self.inner.lock();
        inner.calls.push(StorageCall::Rename {
            id,
            name: name.to_string(),
        });
        let Some(entry) = inner.folders.iter_mut().find(|(f, _)| f.id() == id) else {
            return Err(FolderError::storage(Some(id), "no such folder"));
        };
        entry.0 = entry.0.renamed(name);
        Ok(entry.0.clone())
    }

    fn items(&self, id: FolderId) -> Vec<ItemRef> {
        self.inner
            .lock()
            .folders
            .iter()
            .find(|(f, _)| f.id() == id)
            .map(|(_, items)| items.clone())
            .unwrap_or_default()
    }

    fn add_item(&mut self, id: FolderId, item: &ItemRef) -> FolderResult<bool> {
        let mut inner = self.inner.lock();
        inner.calls.push(StorageCall::AddItem {
            id,
            item: item.clone(),
        });
        let Some((_, items)) = inner.folders.iter_mut().find(|(f, _)| f.id() == id) else {
            return Err(FolderError::storage(Some(id), "no such folder"));
        };
        if items.contains(item) {
            return Ok(false);
        }
        items.push(item.clone());
        Ok(true)
    }
}
