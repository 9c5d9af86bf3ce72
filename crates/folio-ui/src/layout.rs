//! Grid layout for the folder buttons.
//!
//! Everything here is a pure function of the [`LayoutConfig`] and its
//! arguments, so re-running a layout after a rebuild always reproduces the
//! previous positions.

use folio_core::geometry::{Pos, Rect};

use crate::config::LayoutConfig;

/// Grid index reserved for the "add folder" button.
pub const ADD_BUTTON_INDEX: usize = 0;

/// Computes button positions for an elastic button count.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

/// Result of a full layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// One position per grid index; index 0 is the add button.
    pub positions: Vec<Pos<i32>>,
    pub grid_width: i32,
    pub name_label_y: i32,
    pub panel_y: i32,
}

impl GridLayout {
    /// Area covered by the button rows.
    pub fn grid_rect(&self, config: &LayoutConfig) -> Rect<i32> {
        Rect::new(
            config.padding_x,
            config.padding_y,
            self.grid_width,
            self.rows as i32 * config.vertical_spacing,
        )
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of columns that fit, never less than one.
    pub fn compute_columns(&self, available_width: i32) -> usize {
        let cell = self.config.cell_width().max(1);
        (available_width.max(0) / cell).max(1) as usize
    }

    /// Top-left corner of the button at grid `index`.
    pub fn position_of(&self, index: usize, columns: usize) -> Pos<i32> {
        let columns = columns.max(1);
        let row = (index / columns) as i32;
        let col = (index % columns) as i32;
        Pos::new(
            self.config.padding_x + col * self.config.cell_width(),
            self.config.padding_y + row * self.config.vertical_spacing,
        )
    }

    /// Rows needed for `buttons` grid cells, the add button included.
    pub fn row_count(&self, buttons: usize, columns: usize) -> usize {
        buttons.div_ceil(columns.max(1))
    }

    pub fn grid_width(&self, columns: usize) -> i32 {
        columns as i32 * self.config.cell_width()
    }

    /// Top of the folder-name label below `rows` button rows.
    pub fn name_label_y(&self, rows: usize) -> i32 {
        self.config.padding_y
            + rows as i32 * self.config.vertical_spacing
            + self.config.name_label_offset
    }

    /// Top of the content panel below `rows` button rows.
    pub fn panel_y(&self, rows: usize) -> i32 {
        self.name_label_y(rows) + self.config.panel_offset
    }

    /// Bounds of a button placed at `pos`.
    pub fn button_rect(&self, pos: Pos<i32>) -> Rect<i32> {
        Rect::new(
            pos.x,
            pos.y,
            self.config.button_width,
            self.config.button_height,
        )
    }

    /// Lay out the add button plus `folder_count` folder buttons.
    pub fn compute(&self, folder_count: usize, available_width: i32) -> GridLayout {
        let columns = self.compute_columns(available_width);
        let cells = folder_count + 1;
        let rows = self.row_count(cells, columns);
        let positions = (0..cells).map(|i| self.position_of(i, columns)).collect();

        tracing::trace!(
            "layout: {} cells, {} columns, {} rows for width {}",
            cells,
            columns,
            rows,
            available_width
        );

        GridLayout {
            columns,
            rows,
            positions,
            grid_width: self.grid_width(columns),
            name_label_y: self.name_label_y(rows),
            panel_y: self.panel_y(rows),
        }
    }
}
