//! Folder buttons: the tiles of the folder bar.

use folio_core::geometry::{Pos, Rect};
use folio_core::math::Vec2;

use crate::folder::{Folder, FolderId};

/// What a button does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonKind {
    /// Bound to a folder: toggles it and accepts dropped items.
    Normal(Folder),
    /// Opens the "new folder" flow.
    Add,
    /// Deletes the active folder.
    Delete,
}

/// A tile in the folder bar.
///
/// Rebuilt from scratch on every reload; only the coordinator mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderButton {
    kind: ButtonKind,
    pub x: i32,
    pub y: i32,
    width: i32,
    height: i32,
    active: bool,
    hovered: bool,
    hover_progress: f32,
}

impl FolderButton {
    pub fn new(kind: ButtonKind, pos: Pos<i32>, width: i32, height: i32) -> Self {
        Self {
            kind,
            x: pos.x,
            y: pos.y,
            width,
            height,
            active: false,
            hovered: false,
            hover_progress: 0.0,
        }
    }

    pub fn folder_button(folder: Folder, pos: Pos<i32>, width: i32, height: i32) -> Self {
        Self::new(ButtonKind::Normal(folder), pos, width, height)
    }

    pub fn kind(&self) -> &ButtonKind {
        &self.kind
    }

    pub fn is_add(&self) -> bool {
        matches!(self.kind, ButtonKind::Add)
    }

    pub fn is_delete(&self) -> bool {
        matches!(self.kind, ButtonKind::Delete)
    }

    /// The bound folder, for [`ButtonKind::Normal`] buttons.
    pub fn folder(&self) -> Option<&Folder> {
        match &self.kind {
            ButtonKind::Normal(folder) => Some(folder),
            _ => None,
        }
    }

    pub fn folder_id(&self) -> Option<FolderId> {
        self.folder().map(Folder::id)
    }

    pub(crate) fn replace_folder(&mut self, folder: Folder) {
        if let ButtonKind::Normal(current) = &mut self.kind {
            *current = folder;
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rect(&self) -> Rect<i32> {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect().contains(point)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub(crate) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Hover highlight strength in `[0, 1]`.
    pub fn hover_progress(&self) -> f32 {
        self.hover_progress
    }

    /// Move the hover animation one step toward its target.
    pub(crate) fn tick_hover(&mut self, step: f32) {
        let target = if self.hovered { 1.0 } else { 0.0 };
        if self.hover_progress < target {
            self.hover_progress = (self.hover_progress + step).min(target);
        } else if self.hover_progress > target {
            self.hover_progress = (self.hover_progress - step).max(target);
        }
    }
}
