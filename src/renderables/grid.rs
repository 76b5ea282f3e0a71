//! Grid - an unbordered, headerless table for positional layout.
//!
//! A [`Grid`] wraps a [`Table`] locked into grid mode: no border, no
//! headers, no right padding on the final column so the right edge stays
//! flush. It exposes only the mutations that make sense for a layout grid
//! and forwards measure/render to the table engine unchanged.

use crate::context::RenderContext;
use crate::measure::Measurement;
use crate::segment::Segment;
use crate::text::Alignment;

use super::table::{ColumnPadding, Table, TableColumn};
use super::{BoxedRenderable, Renderable};

/// A column definition for a [`Grid`].
#[derive(Debug, Clone)]
pub struct GridColumn {
    width: Option<usize>,
    no_wrap: bool,
    padding: ColumnPadding,
    alignment: Alignment,
    explicit_padding: bool,
}

impl Default for GridColumn {
    fn default() -> Self {
        Self {
            width: None,
            no_wrap: false,
            padding: ColumnPadding::new(0, 1),
            alignment: Alignment::Left,
            explicit_padding: false,
        }
    }
}

impl GridColumn {
    /// Create a column with grid defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the content width.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Forbid wrapping in this column.
    #[must_use]
    pub const fn no_wrap(mut self) -> Self {
        self.no_wrap = true;
        self
    }

    /// Set explicit padding. Explicit padding also re-enables right
    /// padding on the grid's final column.
    #[must_use]
    pub const fn padding(mut self, left: usize, right: usize) -> Self {
        self.padding = ColumnPadding::new(left, right);
        self.explicit_padding = true;
        self
    }

    /// Set the content alignment.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn into_table_column(self) -> TableColumn {
        let mut column = TableColumn::new("").alignment(self.alignment);
        if let Some(width) = self.width {
            column = column.width(width);
        }
        if self.no_wrap {
            column = column.no_wrap();
        }
        // Grid padding always lands on the table column; the explicit flag
        // only drives the pad_right_cell decision above.
        column.padding(self.padding.left, self.padding.right)
    }
}

/// An unbordered layout grid.
pub struct Grid {
    table: Table,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Table::new().grid_mode(),
        }
    }

    /// Add a column with default settings.
    ///
    /// # Panics
    ///
    /// Panics if any row has already been added.
    pub fn add_column(&mut self, column: GridColumn) {
        // Only pad the rightmost cell when the caller explicitly asked
        // for padding; a flush right edge is the grid default.
        self.table.set_pad_right_cell(column.explicit_padding);
        self.table.add_column(column.into_table_column());
    }

    /// Add `count` default columns.
    ///
    /// # Panics
    ///
    /// Panics if any row has already been added.
    pub fn add_columns(&mut self, count: usize) {
        for _ in 0..count {
            self.add_column(GridColumn::new());
        }
    }

    /// Add a row of renderable cells.
    ///
    /// # Panics
    ///
    /// Panics if the cell count differs from the column count.
    pub fn add_row(&mut self, cells: Vec<BoxedRenderable>) {
        self.table.add_row(cells);
    }

    /// Add a row of text cells.
    ///
    /// # Panics
    ///
    /// Panics if the cell count differs from the column count.
    pub fn add_row_cells<T: Into<crate::text::Text>>(
        &mut self,
        cells: impl IntoIterator<Item = T>,
    ) {
        self.table.add_row_cells(cells);
    }

    /// Add a row of empty text cells, one per column.
    pub fn add_empty_row(&mut self) {
        self.table.add_empty_row();
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.table.column_count()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }
}

impl Renderable for Grid {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        self.table.measure(context, max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        self.table.render(context, width)
    }
}
