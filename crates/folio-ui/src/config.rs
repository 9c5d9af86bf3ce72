//! Configuration for the folder bar.

use std::time::Duration;

/// Default window within which a rebuild restores the previous selection.
pub const DEFAULT_REBUILD_DEBOUNCE: Duration = Duration::from_millis(500);

/// Default hover animation step per tick.
pub const DEFAULT_HOVER_STEP: f32 = 0.1;

/// Grid metrics, in host GUI pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub button_width: i32,
    pub button_height: i32,
    /// Applied on both sides of every button, so adjacent buttons sit
    /// `2 * horizontal_spacing` apart.
    pub horizontal_spacing: i32,
    /// Distance between the tops of consecutive rows.
    pub vertical_spacing: i32,
    pub padding_x: i32,
    pub padding_y: i32,
    /// Gap between the last button row and the folder-name label.
    pub name_label_offset: i32,
    pub name_label_height: i32,
    /// Gap between the folder-name label and the content panel.
    pub panel_offset: i32,
    /// Fixed panel height for the exclusion zone. Zero means the panel
    /// reports its own bounds.
    pub panel_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            button_width: 20,
            button_height: 20,
            horizontal_spacing: 2,
            vertical_spacing: 24,
            padding_x: 4,
            padding_y: 4,
            name_label_offset: 4,
            name_label_height: 12,
            panel_offset: 18,
            panel_height: 0,
        }
    }
}

impl LayoutConfig {
    /// Horizontal distance between the left edges of neighbouring buttons.
    pub fn cell_width(&self) -> i32 {
        self.button_width + 2 * self.horizontal_spacing
    }
}

/// Configuration for a folder coordinator.
#[derive(Debug, Clone)]
pub struct FolioConfig {
    pub layout: LayoutConfig,
    /// How recent the last rebuild must be for the durable selection to be
    /// restored silently.
    pub rebuild_debounce: Duration,
    /// Hover progress change per tick.
    pub hover_step: f32,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            rebuild_debounce: DEFAULT_REBUILD_DEBOUNCE,
            hover_step: DEFAULT_HOVER_STEP,
        }
    }
}

impl FolioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_rebuild_debounce(mut self, window: Duration) -> Self {
        self.rebuild_debounce = window;
        self
    }

    pub fn with_hover_step(mut self, step: f32) -> Self {
        self.hover_step = step;
        self
    }

    /// Clamp values that would break layout or animation.
    pub fn validated(mut self) -> Self {
        if self.layout.button_width <= 0 {
            tracing::warn!(
                "button_width {} is not positive, using default",
                self.layout.button_width
            );
            self.layout.button_width = LayoutConfig::default().button_width;
        }
        if self.layout.button_height <= 0 {
            tracing::warn!(
                "button_height {} is not positive, using default",
                self.layout.button_height
            );
            self.layout.button_height = LayoutConfig::default().button_height;
        }
        if self.layout.horizontal_spacing < 0 {
            tracing::warn!("negative horizontal_spacing clamped to 0");
            self.layout.horizontal_spacing = 0;
        }
        if !(self.hover_step > 0.0 && self.hover_step <= 1.0) {
            tracing::warn!(
                "hover_step {} outside (0, 1], using default",
                self.hover_step
            );
            self.hover_step = DEFAULT_HOVER_STEP;
        }
        self
    }
}
