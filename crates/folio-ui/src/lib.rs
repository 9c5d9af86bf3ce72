//! Folio UI - folder state and interaction coordinator
//!
//! Organizes a host application's bookmarked items into folders shown as a
//! grid of buttons above a content panel. The host UI may destroy and rebuild
//! its widgets at any time; this crate keeps the folder selection consistent
//! across those rebuilds and routes clicks and drops to the right target.
//!
//! - [`layout`]: pure grid placement for an elastic number of buttons
//! - [`event`]: typed lifecycle events with fault-contained delivery
//! - [`exclusion`]: rectangles the host overlay must keep clear of
//! - [`state`]: active-folder selection and rebuild restoration
//! - [`drag`]: drag session and first-match drop target resolution
//! - [`coordinator`]: the facade the host glue talks to
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use folio_ui::{FolderCoordinator, PointerButton, SessionState, Vec2};
//!
//! // Once per process:
//! let session = SessionState::shared();
//!
//! // Every time the host opens the screen:
//! let mut folders = FolderCoordinator::builder(storage, panel)
//!     .session(session.clone())
//!     .build();
//! folders.reload(screen_width);
//!
//! // In the input and tick callbacks:
//! folders.on_click(Vec2::new(x, y), PointerButton::Primary)?;
//! folders.on_tick();
//! overlay.avoid(folders.exclusion_zones());
//! ```

pub mod button;
pub mod config;
pub mod coordinator;
pub mod deferred;
pub mod drag;
pub mod error;
pub mod event;
pub mod exclusion;
pub mod folder;
pub mod host;
pub mod layout;
pub mod session;
pub mod state;
pub mod time;

pub use button::{ButtonKind, FolderButton};
pub use config::{FolioConfig, LayoutConfig};
pub use coordinator::{FolderCoordinator, FolderCoordinatorBuilder, LayoutAnchors};
pub use deferred::{DeferredAction, DeferredQueue};
pub use drag::{DragPhase, DragSession, DropAction, DropResolver, DropTarget};
pub use error::{FolderError, FolderResult};
pub use event::{
    EventDispatcher, FolderEvent, FolderEventKind, ListenerResult, MAX_RECORDED_FAULTS,
    PointerButton, SubscriptionId,
};
pub use exclusion::ExclusionZones;
pub use folder::{Folder, FolderId, ItemRef};
pub use host::{ContentPanel, FolderStorage};
pub use layout::{GridLayout, LayoutEngine};
pub use session::{SessionState, SharedSession};
pub use state::FolderState;
pub use time::{Clock, SystemClock};

// Re-export common types from dependencies
pub use folio_core::geometry::{Pos, Rect};
pub use folio_core::math::Vec2;
