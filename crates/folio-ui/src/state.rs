//! Active-folder selection and the button list.
//!
//! [`FolderState`] is the only place that mutates buttons or the durable
//! [`SessionState`](crate::session::SessionState). Everything else reads
//! through it.

use folio_core::geometry::{Pos, Rect};
use folio_core::math::Vec2;
use folio_core::profiling::profile_function;

use crate::button::{ButtonKind, FolderButton};
use crate::config::FolioConfig;
use crate::error::{FolderResult, validate_name};
use crate::event::{EventDispatcher, FolderEvent};
use crate::folder::{Folder, FolderId, ItemRef};
use crate::host::{ContentPanel, FolderStorage};
use crate::layout::{ADD_BUTTON_INDEX, GridLayout, LayoutEngine};
use crate::session::SharedSession;
use crate::time::Clock;

/// Selection state plus the collaborators it drives.
pub struct FolderState {
    config: FolioConfig,
    engine: LayoutEngine,
    /// Grid buttons in display order (add button first), followed by the
    /// delete button while a folder is active.
    buttons: Vec<FolderButton>,
    /// Index into `buttons` of the active folder button.
    active: Option<usize>,
    layout: Option<GridLayout>,
    available_width: i32,
    session: SharedSession,
    storage: Box<dyn FolderStorage>,
    panel: Box<dyn ContentPanel>,
    clock: Box<dyn Clock>,
    events: EventDispatcher,
}

impl FolderState {
    pub fn new(
        config: FolioConfig,
        session: SharedSession,
        storage: Box<dyn FolderStorage>,
        panel: Box<dyn ContentPanel>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            engine: LayoutEngine::new(config.layout),
            config,
            buttons: Vec::new(),
            active: None,
            layout: None,
            available_width: 0,
            session,
            storage,
            panel,
            clock,
            events: EventDispatcher::new(),
        }
    }

    // -- queries --

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn buttons(&self) -> &[FolderButton] {
        &self.buttons
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_button(&self) -> Option<&FolderButton> {
        self.active.and_then(|i| self.buttons.get(i))
    }

    pub fn active_folder(&self) -> Option<&Folder> {
        self.active_button().and_then(FolderButton::folder)
    }

    pub fn active_folder_id(&self) -> Option<FolderId> {
        self.active_folder().map(Folder::id)
    }

    pub fn index_of(&self, id: FolderId) -> Option<usize> {
        self.buttons.iter().position(|b| b.folder_id() == Some(id))
    }

    /// Topmost button under `point`.
    pub fn button_at(&self, point: Vec2) -> Option<usize> {
        self.buttons.iter().position(|b| b.contains(point))
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Items cached for the active folder.
    pub fn cached_items(&self) -> Vec<ItemRef> {
        self.session.borrow().cached_items.clone()
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    pub fn storage(&self) -> &dyn FolderStorage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn FolderStorage {
        self.storage.as_mut()
    }

    pub fn panel(&self) -> &dyn ContentPanel {
        self.panel.as_ref()
    }

    pub fn panel_mut(&mut self) -> &mut dyn ContentPanel {
        self.panel.as_mut()
    }

    /// True when a durable selection exists and the last rebuild was within
    /// the debounce window: the UI was just rebuilt, not freshly opened.
    pub fn should_restore_from_durable_state(&self) -> bool {
        self.session
            .borrow()
            .is_within(self.config.rebuild_debounce, self.clock.now())
    }

    // -- rebuild --

    /// Reload folders from storage at the last known width.
    pub fn reload_from_storage(&mut self) -> &[FolderButton] {
        let folders = self.storage.load_all();
        self.reload(folders, self.available_width)
    }

    /// Recreate every button for `folders` and restore the selection.
    ///
    /// The folder that stays active is, in order of preference: the one this
    /// state already had active, then the durable one if the last rebuild
    /// was recent enough. If that folder is gone the durable selection is
    /// cleared along with its cached items.
    pub fn reload(&mut self, folders: Vec<Folder>, available_width: i32) -> &[FolderButton] {
        profile_function!();

        let preferred = match self.active_folder_id() {
            Some(id) => Some(id),
            None if self.should_restore_from_durable_state() => self.session.borrow().last_active,
            None => {
                self.expire_selection();
                None
            }
        };

        let layout = self.engine.compute(folders.len(), available_width);
        let config = self.config.layout;
        let mut buttons = Vec::with_capacity(folders.len() + 2);
        buttons.push(FolderButton::new(
            ButtonKind::Add,
            layout.positions[ADD_BUTTON_INDEX],
            config.button_width,
            config.button_height,
        ));
        for (folder, pos) in folders.into_iter().zip(layout.positions.iter().skip(1)) {
            buttons.push(FolderButton::folder_button(
                folder,
                *pos,
                config.button_width,
                config.button_height,
            ));
        }

        self.buttons = buttons;
        self.active = None;
        self.layout = Some(layout);
        self.available_width = available_width;

        if let Some(id) = preferred {
            self.restore(id);
        }

        tracing::trace!("reloaded {} buttons", self.buttons.len());
        &self.buttons
    }

    /// Drop a durable selection that outlived the debounce window, here and
    /// in storage.
    fn expire_selection(&mut self) {
        let stale = self.session.borrow().last_active;
        let Some(stale) = stale else {
            return;
        };
        tracing::debug!("{} selection expired, starting fresh", stale);
        self.session.borrow_mut().clear_selection();
        self.storage.set_last_active_id(None);
    }

    fn restore(&mut self, id: FolderId) {
        let Some(index) = self.index_of(id) else {
            tracing::debug!("{} no longer exists, clearing selection", id);
            self.session.borrow_mut().clear_selection();
            self.storage.set_last_active_id(None);
            self.panel.refresh(None, true);
            return;
        };

        self.buttons[index].set_active(true);
        self.active = Some(index);
        {
            let mut session = self.session.borrow_mut();
            session.last_active = Some(id);
            session.touch(self.clock.now());
        }
        self.sync_delete_button();

        tracing::debug!("restored {}", id);
        if let Some(folder) = self.buttons[index].folder() {
            self.panel.refresh(Some(folder), false);
        }
    }

    // -- selection --

    /// Make the button at `index` the active one.
    ///
    /// Ignored for out-of-range indices and role buttons.
    pub fn activate(&mut self, index: usize) {
        let Some(folder) = self.buttons.get(index).and_then(|b| b.folder()).cloned() else {
            return;
        };

        if let Some(previous) = self.active.filter(|&p| p != index) {
            if let Some(button) = self.buttons.get_mut(previous) {
                button.set_active(false);
            }
        }

        self.buttons[index].set_active(true);
        self.active = Some(index);

        let items = self.storage.items(folder.id());
        self.session
            .borrow_mut()
            .record_activation(folder.id(), items, self.clock.now());
        self.storage.set_last_active_id(Some(folder.id()));
        self.sync_delete_button();

        tracing::debug!("activated {} ({})", folder.id(), folder.name());
        let button = self.buttons[index].clone();
        self.events.publish(&FolderEvent::Activated {
            folder: folder.clone(),
            button,
        });
        self.panel.refresh(Some(&folder), true);
    }

    pub fn activate_folder(&mut self, id: FolderId) {
        if let Some(index) = self.index_of(id) {
            self.activate(index);
        }
    }

    /// Activate the button at `index`, or deactivate it if it is already the
    /// active one.
    pub fn toggle(&mut self, index: usize) {
        if self.active == Some(index) {
            self.deactivate();
        } else {
            self.activate(index);
        }
    }

    /// Clear the selection, the durable id and the cached items.
    pub fn deactivate(&mut self) {
        let Some(index) = self.active.take() else {
            return;
        };
        let folder = self.buttons.get_mut(index).and_then(|button| {
            button.set_active(false);
            button.folder().cloned()
        });

        self.session.borrow_mut().clear_selection();
        self.storage.set_last_active_id(None);
        self.sync_delete_button();

        if let Some(folder) = folder {
            tracing::debug!("deactivated {}", folder.id());
            self.events.publish(&FolderEvent::Deactivated { folder });
        }
        self.panel.refresh(None, true);
    }

    // -- storage-backed operations --

    /// Create a folder and add its button.
    pub fn create_folder(&mut self, name: &str) -> FolderResult<Folder> {
        let name = validate_name(name)?;
        let folder = self.storage.create(&name).inspect_err(|e| {
            tracing::warn!("failed to create folder {:?}: {}", name, e);
        })?;

        tracing::debug!("created {} ({})", folder.id(), folder.name());
        self.events.publish(&FolderEvent::Created {
            folder: folder.clone(),
        });
        self.reload_from_storage();
        Ok(folder)
    }

    /// Remove the active folder from storage. Does nothing if none is active.
    pub fn delete_active(&mut self) -> FolderResult<()> {
        let Some(folder) = self.active_folder().cloned() else {
            return Ok(());
        };

        self.storage.remove(folder.id()).inspect_err(|e| {
            tracing::warn!("failed to delete {}: {}", folder.id(), e);
        })?;

        if let Some(index) = self.active.take() {
            self.buttons[index].set_active(false);
        }
        self.session.borrow_mut().clear_selection();
        self.storage.set_last_active_id(None);

        tracing::debug!("deleted {} ({})", folder.id(), folder.name());
        self.events.publish(&FolderEvent::Deleted {
            id: folder.id(),
            name: folder.name().to_string(),
        });
        self.panel.refresh(None, true);
        self.reload_from_storage();
        Ok(())
    }

    /// Rename a folder, keeping its position and selection.
    pub fn rename_folder(&mut self, id: FolderId, name: &str) -> FolderResult<Folder> {
        let name = validate_name(name)?;
        let folder = self.storage.rename(id, &name).inspect_err(|e| {
            tracing::warn!("failed to rename {}: {}", id, e);
        })?;

        let mut previous_name = String::new();
        if let Some(index) = self.index_of(id) {
            if let Some(old) = self.buttons[index].folder() {
                previous_name = old.name().to_string();
            }
            self.buttons[index].replace_folder(folder.clone());
        }

        tracing::debug!("renamed {} to {:?}", id, folder.name());
        self.events.publish(&FolderEvent::Renamed {
            previous_name,
            folder: folder.clone(),
        });
        if self.active_folder_id() == Some(id) {
            self.panel.refresh(Some(&folder), false);
        }
        Ok(folder)
    }

    /// Add a dropped item to a folder. Refreshes the panel when that folder
    /// is the one on display.
    pub fn add_item(&mut self, id: FolderId, item: &ItemRef) -> FolderResult<bool> {
        let added = self.storage.add_item(id, item)?;
        if added && self.active_folder_id() == Some(id) {
            let items = self.storage.items(id);
            self.session.borrow_mut().cached_items = items;
            if let Some(folder) = self.active_folder().cloned() {
                self.panel.refresh(Some(&folder), true);
            }
        }
        Ok(added)
    }

    /// Re-read the active folder's items into the session cache.
    pub fn refresh_cached_items(&mut self) {
        if let Some(id) = self.active_folder_id() {
            let items = self.storage.items(id);
            self.session.borrow_mut().cached_items = items;
        }
    }

    // -- per-frame --

    /// Update hover flags for the pointer at `point`.
    pub fn update_hover(&mut self, point: Vec2) {
        let hovered = self.button_at(point);
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.set_hovered(Some(i) == hovered);
        }
    }

    pub fn clear_hover(&mut self) {
        for button in &mut self.buttons {
            button.set_hovered(false);
        }
    }

    /// Advance hover animations by one step.
    pub fn tick(&mut self) {
        let step = self.config.hover_step;
        for button in &mut self.buttons {
            button.tick_hover(step);
        }
    }

    /// Bounds of the folder-name label, while a folder is active.
    pub fn name_label_rect(&self) -> Option<Rect<i32>> {
        let layout = self.layout.as_ref()?;
        self.active?;
        Some(Rect::new(
            self.config.layout.padding_x,
            layout.name_label_y,
            layout.grid_width,
            self.config.layout.name_label_height,
        ))
    }

    /// Add the delete button while a folder is active, remove it otherwise.
    fn sync_delete_button(&mut self) {
        let has_delete = self.buttons.last().is_some_and(FolderButton::is_delete);
        match (self.active.is_some(), has_delete) {
            (true, false) => {
                if let Some(button) = self.delete_button() {
                    self.buttons.push(button);
                }
            }
            (false, true) => {
                self.buttons.pop();
            }
            _ => {}
        }
    }

    fn delete_button(&self) -> Option<FolderButton> {
        let layout = self.layout.as_ref()?;
        let config = &self.config.layout;
        let size = config.name_label_height;
        let x = config.padding_x + layout.grid_width - config.horizontal_spacing - size;
        Some(FolderButton::new(
            ButtonKind::Delete,
            Pos::new(x, layout.name_label_y),
            size,
            size,
        ))
    }
}

impl std::fmt::Debug for FolderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderState")
            .field("buttons", &self.buttons.len())
            .field("active", &self.active)
            .field("available_width", &self.available_width)
            .field("events", &self.events)
            .finish()
    }
}
