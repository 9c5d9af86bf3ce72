//! Folio - folder bar state for bookmark screens
//!
//! Folio keeps a host application's bookmark folders consistent while the
//! host destroys and rebuilds its widgets. It provides:
//!
//! - **Layout**: elastic grid placement of folder buttons
//! - **Selection**: one active folder, restored across rapid rebuilds
//! - **Events**: typed folder lifecycle notifications
//! - **Drag and drop**: first-match routing of dropped items
//! - **Exclusion zones**: areas the host overlay must leave alone
//!
//! # Quick Start
//!
//! ```ignore
//! use folio::prelude::*;
//!
//! folio::core::logging::init();
//! let session = SessionState::shared();
//!
//! let mut folders = FolderCoordinator::builder(storage, panel)
//!     .session(session.clone())
//!     .build();
//! folders.reload(screen_width);
//! folders.on_click(Vec2::new(30.0, 10.0), PointerButton::Primary)?;
//! ```

// Re-export core types
pub use folio_core as core;
pub use folio_core::math;

#[cfg(feature = "ui")]
pub use folio_ui as ui;

#[cfg(feature = "ui")]
pub use folio_ui::{
    FolderCoordinator, FolderCoordinatorBuilder, FolderError, FolderEvent, FolderEventKind,
    FolderResult, FolioConfig, LayoutConfig, SessionState, SharedSession,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use folio_core::geometry::{Pos, Rect, Size};
    pub use folio_core::math::Vec2;

    #[cfg(feature = "ui")]
    pub use folio_ui::{
        Clock, ContentPanel, DeferredAction, DropAction, Folder, FolderCoordinator, FolderError,
        FolderEvent, FolderEventKind, FolderId, FolderResult, FolderStorage, FolioConfig, ItemRef,
        LayoutConfig, PointerButton, SessionState, SharedSession,
    };
}
