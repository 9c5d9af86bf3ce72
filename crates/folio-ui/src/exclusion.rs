//! Screen areas the host overlay must keep clear of.

use folio_core::alloc::HashSet;
use folio_core::geometry::Rect;

/// Deduplicated, unordered set of rectangles. Never holds a zero-area rect.
#[derive(Debug, Clone, Default)]
pub struct ExclusionZones {
    zones: HashSet<Rect<i32>>,
}

impl ExclusionZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rectangle. Empty rectangles are dropped silently; they show up
    /// routinely while a layout is being recalculated.
    ///
    /// Returns `true` if the set grew.
    pub fn add(&mut self, rect: Rect<i32>) -> bool {
        if rect.is_empty() {
            tracing::trace!("ignoring empty exclusion zone {:?}", rect);
            return false;
        }
        self.zones.insert(rect)
    }

    pub fn remove(&mut self, rect: &Rect<i32>) -> bool {
        self.zones.remove(rect)
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }

    /// Copy of the current set, safe to hand to the host overlay.
    pub fn snapshot(&self) -> HashSet<Rect<i32>> {
        self.zones.clone()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn contains(&self, rect: &Rect<i32>) -> bool {
        self.zones.contains(rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect<i32>> {
        self.zones.iter()
    }

    /// Replace the whole set with the zones of the current layout.
    pub fn rebuild(&mut self, zones: impl IntoIterator<Item = Rect<i32>>) {
        self.zones.clear();
        for rect in zones {
            self.add(rect);
        }
    }
}
