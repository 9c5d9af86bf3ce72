//! Drag session tracking and drop target resolution.

use folio_core::geometry::Rect;
use folio_core::math::Vec2;
use folio_core::profiling::profile_function;

use crate::button::FolderButton;
use crate::folder::{FolderId, ItemRef};

/// Phase of the single drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// An item was pressed and the host signalled a drag.
    Armed,
}

/// The item being dragged, if any.
///
/// There is exactly one per coordinator. `Idle -> Armed` on
/// [`DragSession::begin`]; back to `Idle` on drop, cancel or pointer release.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    phase: DragPhase,
    item: Option<ItemRef>,
    /// Pointer was down on the previous update.
    pressed: bool,
    /// Press persisted across updates: a real gesture, not a hover preview.
    live: bool,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the session for `item`. Ignored while already armed.
    pub fn begin(&mut self, item: ItemRef) {
        if self.phase == DragPhase::Armed {
            tracing::trace!("drag already armed, ignoring begin for {}", item);
            return;
        }
        tracing::debug!("drag armed for {}", item);
        self.phase = DragPhase::Armed;
        self.item = Some(item);
        self.pressed = false;
        self.live = false;
    }

    /// Feed the pointer state for this frame.
    ///
    /// The gesture turns live once the press is seen on two consecutive
    /// updates. Releasing the pointer resets the session. Returns whether
    /// the drag is live.
    pub fn update(&mut self, pointer_down: bool) -> bool {
        if self.phase == DragPhase::Idle {
            return false;
        }
        if !pointer_down {
            tracing::debug!("pointer released, drag reset");
            self.reset();
            return false;
        }
        if self.pressed {
            self.live = true;
        }
        self.pressed = true;
        self.live
    }

    /// Leave the session idle, returning the dragged item.
    pub fn end(&mut self) -> Option<ItemRef> {
        let item = self.item.take();
        self.reset();
        item
    }

    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.item = None;
        self.pressed = false;
        self.live = false;
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_armed(&self) -> bool {
        self.phase == DragPhase::Armed
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn item(&self) -> Option<&ItemRef> {
        self.item.as_ref()
    }
}

/// What happens when an item lands on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropAction {
    /// Add the item to this folder.
    Folder(FolderId),
    /// Hand the item to the open folder's content panel.
    ContentPanel,
}

/// A rectangle paired with the action a drop inside it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub rect: Rect<i32>,
    pub action: DropAction,
}

impl DropTarget {
    pub fn new(rect: Rect<i32>, action: DropAction) -> Self {
        Self { rect, action }
    }
}

/// First target whose rectangle contains `point`.
///
/// Order is priority: earlier targets win where rectangles overlap.
pub fn first_match(targets: &[DropTarget], point: Vec2) -> Option<&DropTarget> {
    targets.iter().find(|target| target.rect.contains(point))
}

/// Ordered drop targets for the current layout.
#[derive(Debug, Clone, Default)]
pub struct DropResolver {
    targets: Vec<DropTarget>,
}

impl DropResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folder buttons in display order, then the content panel if shown.
    ///
    /// Role buttons (add, delete) never accept drops.
    pub fn rebuild<'a>(
        &mut self,
        buttons: impl IntoIterator<Item = &'a FolderButton>,
        panel: Option<Rect<i32>>,
    ) {
        self.targets.clear();
        self.targets.extend(buttons.into_iter().filter_map(|button| {
            button
                .folder_id()
                .map(|id| DropTarget::new(button.rect(), DropAction::Folder(id)))
        }));
        if let Some(rect) = panel.filter(|rect| !rect.is_empty()) {
            self.targets
                .push(DropTarget::new(rect, DropAction::ContentPanel));
        }
    }

    pub fn with_targets(targets: Vec<DropTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[DropTarget] {
        &self.targets
    }

    pub fn resolve(&self, point: Vec2) -> Option<&DropTarget> {
        profile_function!();
        first_match(&self.targets, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonKind;
    use crate::folder::Folder;
    use folio_core::geometry::Pos;

    #[test]
    fn test_first_match_wins_on_overlap() {
        let targets = [
            DropTarget::new(Rect::new(0, 0, 10, 10), DropAction::Folder(FolderId(1))),
            DropTarget::new(Rect::new(5, 5, 10, 10), DropAction::Folder(FolderId(2))),
            DropTarget::new(Rect::new(100, 100, 10, 10), DropAction::ContentPanel),
        ];

        let hit = first_match(&targets, Vec2::new(7.0, 7.0)).unwrap();
        assert_eq!(hit.action, DropAction::Folder(FolderId(1)));

        let hit = first_match(&targets, Vec2::new(12.0, 12.0)).unwrap();
        assert_eq!(hit.action, DropAction::Folder(FolderId(2)));

        assert!(first_match(&targets, Vec2::new(50.0, 50.0)).is_none());
    }

    #[test]
    fn test_rebuild_orders_panel_last_and_skips_roles() {
        let add = FolderButton::new(ButtonKind::Add, Pos::new(0, 0), 20, 20);
        let ores = FolderButton::folder_button(Folder::new(FolderId(3), "Ores"), Pos::new(24, 0), 20, 20);
        let mut resolver = DropResolver::new();
        resolver.rebuild([&add, &ores], Some(Rect::new(0, 0, 200, 200)));

        assert_eq!(resolver.targets().len(), 2);
        assert_eq!(resolver.targets()[0].action, DropAction::Folder(FolderId(3)));
        assert_eq!(resolver.targets()[1].action, DropAction::ContentPanel);

        // Button beats the panel it overlaps.
        let hit = resolver.resolve(Vec2::new(30.0, 5.0)).unwrap();
        assert_eq!(hit.action, DropAction::Folder(FolderId(3)));
        // Add button area falls through to the panel.
        let hit = resolver.resolve(Vec2::new(5.0, 5.0)).unwrap();
        assert_eq!(hit.action, DropAction::ContentPanel);
    }

    #[test]
    fn test_empty_panel_rect_is_not_a_target() {
        let mut resolver = DropResolver::new();
        resolver.rebuild(std::iter::empty(), Some(Rect::new(0, 0, 0, 100)));
        assert!(resolver.targets().is_empty());
    }

    #[test]
    fn test_drag_session_lifecycle() {
        let mut drag = DragSession::new();
        assert!(!drag.update(true));

        drag.begin(ItemRef::new("iron"));
        assert!(drag.is_armed());
        assert!(!drag.update(true));
        assert!(drag.update(true));
        assert!(drag.is_live());

        assert_eq!(drag.end(), Some(ItemRef::new("iron")));
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(!drag.is_live());
    }

    #[test]
    fn test_release_resets() {
        let mut drag = DragSession::new();
        drag.begin(ItemRef::new("iron"));
        drag.update(true);
        drag.update(true);
        assert!(!drag.update(false));
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(drag.item().is_none());
    }

    #[test]
    fn test_rearm_is_idempotent() {
        let mut drag = DragSession::new();
        drag.begin(ItemRef::new("iron"));
        drag.update(true);
        drag.update(true);
        drag.begin(ItemRef::new("gold"));
        assert!(drag.is_live());
        assert_eq!(drag.item(), Some(&ItemRef::new("iron")));
    }
}
