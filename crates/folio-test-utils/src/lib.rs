//! Test utilities for Folio.
//!
//! In-memory stand-ins for the collaborators the coordinator consumes:
//!
//! - [`MockStorage`] - folder storage that records every call
//! - [`MockPanel`] - content panel with a settable rect and drop policy
//! - [`ManualClock`] - clock advanced by hand for debounce tests
//!
//! Each mock is a cheap handle around shared state: clone it, move one clone
//! into the coordinator, and inspect the other afterwards.
//!
//! ```rust
//! use folio_test_utils::{MockPanel, MockStorage};
//! use folio_ui::FolderCoordinator;
//!
//! let storage = MockStorage::with_folders(["Ores", "Food"]);
//! let panel = MockPanel::new();
//! let mut coordinator = FolderCoordinator::builder(storage.clone(), panel.clone()).build();
//!
//! coordinator.reload(200);
//! coordinator.activate(1);
//! assert_eq!(storage.last_active_id(), Some(folio_ui::FolderId(1)));
//! assert_eq!(panel.refresh_count(), 1);
//! ```

pub mod clock;
pub mod panel;
pub mod storage;

pub use clock::ManualClock;
pub use panel::{MockPanel, PanelCall};
pub use storage::{MockStorage, StorageCall};
