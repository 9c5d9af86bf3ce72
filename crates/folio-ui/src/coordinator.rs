//! Single entry point for the host's UI glue.
//!
//! One [`FolderCoordinator`] is built per UI session (each time the host
//! opens the screen) and handed the long-lived [`SharedSession`]. Input,
//! ticks and drops all flow through it.

use folio_core::alloc::HashSet;
use folio_core::geometry::Rect;
use folio_core::math::Vec2;
use folio_core::profiling::profile_function;

use crate::button::{ButtonKind, FolderButton};
use crate::config::FolioConfig;
use crate::deferred::{DeferredAction, DeferredQueue};
use crate::drag::{DragSession, DropAction, DropResolver};
use crate::error::{FolderError, FolderResult};
use crate::event::{FolderEvent, FolderEventKind, ListenerResult, PointerButton, SubscriptionId};
use crate::exclusion::ExclusionZones;
use crate::folder::{Folder, FolderId, ItemRef};
use crate::host::{ContentPanel, FolderStorage};
use crate::session::{SessionState, SharedSession};
use crate::state::FolderState;
use crate::time::{Clock, SystemClock};

/// Vertical anchors derived from the current row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAnchors {
    pub rows: usize,
    pub name_label_y: i32,
    pub panel_y: i32,
}

/// Builder for [`FolderCoordinator`].
pub struct FolderCoordinatorBuilder {
    config: FolioConfig,
    session: Option<SharedSession>,
    storage: Box<dyn FolderStorage>,
    panel: Box<dyn ContentPanel>,
    clock: Option<Box<dyn Clock>>,
}

impl FolderCoordinatorBuilder {
    pub fn config(mut self, config: FolioConfig) -> Self {
        self.config = config;
        self
    }

    /// Share durable selection state with earlier coordinators.
    pub fn session(mut self, session: SharedSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> FolderCoordinator {
        let state = FolderState::new(
            self.config.validated(),
            self.session.unwrap_or_else(SessionState::shared),
            self.storage,
            self.panel,
            self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        );
        FolderCoordinator {
            state,
            zones: ExclusionZones::new(),
            drag: DragSession::new(),
            drops: DropResolver::new(),
            deferred: DeferredQueue::new(),
            pointer: None,
        }
    }
}

/// Composition root of the folder bar.
#[derive(Debug)]
pub struct FolderCoordinator {
    state: FolderState,
    zones: ExclusionZones,
    drag: DragSession,
    drops: DropResolver,
    deferred: DeferredQueue,
    pointer: Option<Vec2>,
}

impl FolderCoordinator {
    pub fn builder(
        storage: impl FolderStorage + 'static,
        panel: impl ContentPanel + 'static,
    ) -> FolderCoordinatorBuilder {
        FolderCoordinatorBuilder {
            config: FolioConfig::default(),
            session: None,
            storage: Box::new(storage),
            panel: Box::new(panel),
            clock: None,
        }
    }

    pub fn state(&self) -> &FolderState {
        &self.state
    }

    // -- rebuild --

    /// Load folders from storage and lay them out in `available_width`.
    pub fn reload(&mut self, available_width: i32) -> &[FolderButton] {
        let folders = self.state.storage().load_all();
        self.reload_with(folders, available_width)
    }

    /// Lay out an explicit folder list.
    pub fn reload_with(&mut self, folders: Vec<Folder>, available_width: i32) -> &[FolderButton] {
        self.state.reload(folders, available_width);
        self.refresh_geometry();
        self.state.buttons()
    }

    /// Recompute exclusion zones and drop targets from the current layout.
    pub fn refresh_geometry(&mut self) {
        profile_function!();

        let panel = self.panel_rect();
        let mut zones = Vec::with_capacity(3);
        if let Some(layout) = self.state.layout() {
            zones.push(layout.grid_rect(&self.state.config().layout));
        }
        zones.extend(self.state.name_label_rect());
        zones.extend(panel);
        self.zones.rebuild(zones);

        self.drops.rebuild(self.state.buttons(), panel);
    }

    /// The content panel's area, only while a folder is open and the panel
    /// is shown.
    fn panel_rect(&self) -> Option<Rect<i32>> {
        if self.state.active_index().is_none() || !self.state.panel().is_visible() {
            return None;
        }
        let layout_config = &self.state.config().layout;
        if layout_config.panel_height > 0 {
            let layout = self.state.layout()?;
            return Some(Rect::new(
                layout_config.padding_x,
                layout.panel_y,
                layout.grid_width,
                layout_config.panel_height,
            ));
        }
        self.state.panel().bounding_rect()
    }

    // -- input --

    /// Route a click. Returns `Ok(true)` when a button consumed it.
    ///
    /// Storage failures (deleting through the delete button) are returned to
    /// the caller so it can show feedback.
    pub fn on_click(&mut self, pos: Vec2, pointer: PointerButton) -> FolderResult<bool> {
        let Some(index) = self.state.button_at(pos) else {
            return Ok(false);
        };
        let button = self.state.buttons()[index].clone();
        let kind = button.kind().clone();

        let result = match (pointer, &kind) {
            (PointerButton::Primary, ButtonKind::Add) => {
                self.publish_click(button, pointer);
                Ok(true)
            }
            (PointerButton::Primary, ButtonKind::Normal(_)) => {
                self.publish_click(button, pointer);
                self.state.toggle(index);
                Ok(true)
            }
            (PointerButton::Primary, ButtonKind::Delete) => {
                self.state.delete_active().map(|()| true)
            }
            (PointerButton::Secondary, ButtonKind::Normal(_)) => {
                self.publish_click(button, pointer);
                Ok(true)
            }
            _ => Ok(false),
        };

        self.refresh_geometry();
        result
    }

    fn publish_click(&mut self, button: FolderButton, pointer: PointerButton) {
        self.state
            .events_mut()
            .publish(&FolderEvent::Clicked { button, pointer });
    }

    pub fn on_mouse_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
        self.state.update_hover(pos);
    }

    /// Per-frame work: deferred listener actions, hover animation and
    /// geometry for the host overlay.
    pub fn on_tick(&mut self) {
        profile_function!();

        for action in self.deferred.drain() {
            tracing::trace!("running deferred {:?}", action);
            match action {
                DeferredAction::Activate(id) => self.state.activate_folder(id),
                DeferredAction::Deactivate => self.state.deactivate(),
                DeferredAction::Reload => {
                    self.state.reload_from_storage();
                }
            }
        }

        if let Some(pos) = self.pointer {
            self.state.update_hover(pos);
        }
        self.state.tick();
        self.refresh_geometry();
    }

    // -- drag and drop --

    /// The host signalled a drag of `item`. Ignored while already dragging.
    pub fn begin_drag(&mut self, item: ItemRef) {
        self.drag.begin(item);
    }

    /// Feed this frame's pointer state. Returns whether the drag is live.
    pub fn update_drag(&mut self, pointer_down: bool) -> bool {
        self.drag.update(pointer_down)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.reset();
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Target a drop at `pos` would hit, for highlighting. `None` unless a
    /// drag is live. Never mutates.
    pub fn hover_drop_target(&self, pos: Vec2) -> Option<DropAction> {
        if !self.drag.is_live() {
            return None;
        }
        self.drops.resolve(pos).map(|target| target.action)
    }

    /// Deliver `item` to whatever lies under `pos`.
    ///
    /// Returns `Ok(false)` when no drag of `item` is armed or nothing is
    /// there, in which case nothing changes. The drag session ends either way.
    pub fn on_drop(&mut self, pos: Vec2, item: ItemRef) -> FolderResult<bool> {
        if self.drag.end().as_ref() != Some(&item) {
            tracing::debug!("drop of {} without a matching drag, ignored", item);
            return Ok(false);
        }

        let Some(action) = self.drops.resolve(pos).map(|target| target.action) else {
            tracing::trace!("drop of {} hit nothing", item);
            return Ok(false);
        };

        tracing::debug!("drop of {} on {:?}", item, action);
        match action {
            DropAction::Folder(id) => {
                self.state.add_item(id, &item)?;
                Ok(true)
            }
            DropAction::ContentPanel => {
                let accepted = self.state.panel_mut().accept_drop(&item);
                if accepted {
                    self.state.refresh_cached_items();
                }
                Ok(accepted)
            }
        }
    }

    // -- selection --

    pub fn activate(&mut self, index: usize) {
        self.state.activate(index);
        self.refresh_geometry();
    }

    pub fn activate_folder(&mut self, id: FolderId) {
        self.state.activate_folder(id);
        self.refresh_geometry();
    }

    pub fn toggle(&mut self, index: usize) {
        self.state.toggle(index);
        self.refresh_geometry();
    }

    pub fn deactivate(&mut self) {
        self.state.deactivate();
        self.refresh_geometry();
    }

    pub fn should_restore_from_durable_state(&self) -> bool {
        self.state.should_restore_from_durable_state()
    }

    pub fn create_folder(&mut self, name: &str) -> FolderResult<Folder> {
        let folder = self.state.create_folder(name)?;
        self.refresh_geometry();
        Ok(folder)
    }

    pub fn delete_active(&mut self) -> FolderResult<()> {
        self.state.delete_active()?;
        self.refresh_geometry();
        Ok(())
    }

    pub fn rename_folder(&mut self, id: FolderId, name: &str) -> FolderResult<Folder> {
        self.state.rename_folder(id, name)
    }

    // -- events --

    pub fn subscribe<F>(&mut self, kind: FolderEventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&FolderEvent) -> ListenerResult + 'static,
    {
        self.state.events_mut().subscribe(kind, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.events_mut().unsubscribe(id)
    }

    /// Drain the listener failures recorded so far.
    pub fn take_listener_faults(&mut self) -> Vec<FolderError> {
        self.state.events_mut().take_faults()
    }

    /// Queue for listeners that need to trigger coordinator actions.
    pub fn deferred(&self) -> DeferredQueue {
        self.deferred.clone()
    }

    // -- outputs --

    pub fn buttons(&self) -> &[FolderButton] {
        self.state.buttons()
    }

    pub fn active_folder(&self) -> Option<&Folder> {
        self.state.active_folder()
    }

    pub fn cached_items(&self) -> Vec<ItemRef> {
        self.state.cached_items()
    }

    /// Rectangles the host overlay must not draw into.
    pub fn exclusion_zones(&self) -> HashSet<Rect<i32>> {
        self.zones.snapshot()
    }

    pub fn layout_anchors(&self) -> Option<LayoutAnchors> {
        self.state.layout().map(|layout| LayoutAnchors {
            rows: layout.rows,
            name_label_y: layout.name_label_y,
            panel_y: layout.panel_y,
        })
    }

    /// The host closed the screen. Drops transient state; the durable
    /// session is left alone for the next coordinator.
    pub fn close(&mut self) {
        tracing::debug!("closing folder coordinator");
        self.drag.reset();
        self.zones.clear();
        self.pointer = None;
        self.state.clear_hover();
    }
}
