//! Table - the column/row layout engine.
//!
//! A [`Table`] owns a frozen set of columns and a list of rows whose cells
//! are arbitrary renderables. Layout is the two-pass protocol: measure
//! every cell to get per-column width ranges, allocate concrete widths
//! within the terminal budget, then render cells at their allocated widths
//! and stitch the lines together with padding and border segments.
//!
//! Column shape is rigid on purpose: columns can only be added while the
//! table has no rows, and every row must match the column count exactly.
//! Both violations panic at the offending call - silently padding or
//! truncating would hide bugs in code that assembles rows programmatically.

use num_rational::Ratio;

use crate::context::RenderContext;
use crate::measure::{Measurement, measure_sum, measure_union};
use crate::segment::{Segment, split_lines};
use crate::style::Style;
use crate::text::{Alignment, Text};

use super::border::{BorderKind, BorderRow};
use super::{BoxedRenderable, Renderable};

/// Horizontal padding around a column's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPadding {
    /// Cells of padding left of the content.
    pub left: usize,
    /// Cells of padding right of the content.
    pub right: usize,
}

impl ColumnPadding {
    /// Create padding from left/right cell counts.
    #[must_use]
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

impl Default for ColumnPadding {
    fn default() -> Self {
        Self { left: 1, right: 1 }
    }
}

/// A table column definition.
#[derive(Debug, Clone)]
pub struct TableColumn {
    header: Text,
    header_style: Style,
    width: Option<usize>,
    no_wrap: bool,
    padding: ColumnPadding,
    alignment: Alignment,
}

impl TableColumn {
    /// Create a column with a header.
    #[must_use]
    pub fn new(header: impl Into<Text>) -> Self {
        Self {
            header: header.into(),
            header_style: Style::new(),
            width: None,
            no_wrap: false,
            padding: ColumnPadding::default(),
            alignment: Alignment::Left,
        }
    }

    /// Fix the content width of this column.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Forbid wrapping in this column; it is reserved at its widest.
    #[must_use]
    pub const fn no_wrap(mut self) -> Self {
        self.no_wrap = true;
        self
    }

    /// Set the padding.
    #[must_use]
    pub const fn padding(mut self, left: usize, right: usize) -> Self {
        self.padding = ColumnPadding::new(left, right);
        self
    }

    /// Set the content alignment.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set an extra style for this column's header.
    #[must_use]
    pub const fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }
}

/// A renderable table of columns and rows.
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<BoxedRenderable>>,
    border: BorderKind,
    show_headers: bool,
    is_grid: bool,
    pad_right_cell: bool,
    border_style: Style,
    header_style: Style,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            border: BorderKind::Square,
            show_headers: true,
            is_grid: false,
            pad_right_cell: true,
            border_style: Style::new(),
            header_style: Style::new().bold(),
        }
    }
}

impl Table {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border kind.
    #[must_use]
    pub const fn border(mut self, border: BorderKind) -> Self {
        self.border = border;
        self
    }

    /// Set whether the header row renders. Grids never show headers
    /// regardless of this flag.
    #[must_use]
    pub const fn show_headers(mut self, show: bool) -> Self {
        self.show_headers = show;
        self
    }

    /// Set the border style.
    #[must_use]
    pub const fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the base header style.
    #[must_use]
    pub const fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    pub(crate) const fn grid_mode(mut self) -> Self {
        self.border = BorderKind::None;
        self.show_headers = false;
        self.is_grid = true;
        self.pad_right_cell = false;
        self
    }

    pub(crate) const fn set_pad_right_cell(&mut self, pad: bool) {
        self.pad_right_cell = pad;
    }

    /// Add a column.
    ///
    /// # Panics
    ///
    /// Panics if any row has already been added: the column count
    /// determines per-row cell validation and is frozen once data exists.
    pub fn add_column(&mut self, column: TableColumn) {
        assert!(
            self.rows.is_empty(),
            "cannot add columns to a table with existing rows"
        );
        self.columns.push(column);
    }

    /// Add several columns.
    ///
    /// # Panics
    ///
    /// Panics if any row has already been added.
    pub fn add_columns(&mut self, columns: impl IntoIterator<Item = TableColumn>) {
        for column in columns {
            self.add_column(column);
        }
    }

    /// Add a column (builder form).
    ///
    /// # Panics
    ///
    /// Panics if any row has already been added.
    #[must_use]
    pub fn with_column(mut self, column: TableColumn) -> Self {
        self.add_column(column);
        self
    }

    /// Add a row of arbitrary renderable cells.
    ///
    /// # Panics
    ///
    /// Panics if the cell count differs from the column count.
    pub fn add_row(&mut self, cells: Vec<BoxedRenderable>) {
        assert!(
            cells.len() == self.columns.len(),
            "row has {} cells but the table has {} columns",
            cells.len(),
            self.columns.len()
        );
        self.rows.push(cells);
    }

    /// Add a row of text cells, aligned per their columns.
    ///
    /// # Panics
    ///
    /// Panics if the cell count differs from the column count.
    pub fn add_row_cells<T: Into<Text>>(&mut self, cells: impl IntoIterator<Item = T>) {
        let cells: Vec<Text> = cells.into_iter().map(Into::into).collect();
        assert!(
            cells.len() == self.columns.len(),
            "row has {} cells but the table has {} columns",
            cells.len(),
            self.columns.len()
        );
        let boxed = cells
            .into_iter()
            .zip(&self.columns)
            .map(|(text, column)| Box::new(text.alignment(column.alignment)) as BoxedRenderable)
            .collect();
        self.rows.push(boxed);
    }

    /// Add a row of empty cells, one per column.
    pub fn add_empty_row(&mut self) {
        let cells = (0..self.columns.len())
            .map(|_| Box::new(Text::empty()) as BoxedRenderable)
            .collect();
        self.rows.push(cells);
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn headers_visible(&self) -> bool {
        self.show_headers && !self.is_grid
    }

    /// Effective padding of a column, honoring `pad_right_cell` for the
    /// final column.
    fn effective_padding(&self, idx: usize) -> ColumnPadding {
        let padding = self.columns[idx].padding;
        if idx + 1 == self.columns.len() && !self.pad_right_cell {
            ColumnPadding::new(padding.left, 0)
        } else {
            padding
        }
    }

    /// Width consumed by padding and border characters.
    fn overhead(&self) -> usize {
        let padding: usize = (0..self.columns.len())
            .map(|idx| {
                let pad = self.effective_padding(idx);
                pad.left + pad.right
            })
            .sum();
        let borders = if matches!(self.border, BorderKind::None) {
            0
        } else {
            self.columns.len() + 1
        };
        padding + borders
    }

    /// Measure pass: per-column width ranges at the given content budget.
    fn measure_columns(&self, context: &RenderContext, available: usize) -> Vec<Measurement> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                if let Some(fixed) = column.width {
                    return Measurement::exact(fixed);
                }

                let mut measurements = Vec::with_capacity(self.rows.len() + 1);
                if self.headers_visible() {
                    measurements.push(column.header.measure(context, available));
                }
                for row in &self.rows {
                    measurements.push(row[idx].measure(context, available));
                }
                measure_union(&measurements)
            })
            .collect()
    }

    /// Allocation pass: concrete content width per column.
    fn column_widths(&self, context: &RenderContext, max_width: usize) -> Vec<usize> {
        let available = max_width.saturating_sub(self.overhead());
        if available == 0 {
            return vec![0; self.columns.len()];
        }

        let measurements = self.measure_columns(context, available);

        // Fixed and no-wrap columns are reserved at their maximum.
        let reserved: Vec<Option<usize>> = self
            .columns
            .iter()
            .zip(&measurements)
            .map(|(column, m)| {
                if column.width.is_some() || column.no_wrap {
                    Some(m.maximum)
                } else {
                    None
                }
            })
            .collect();
        let reserved_total: usize = reserved.iter().flatten().sum();

        let flexible: Vec<usize> = (0..self.columns.len())
            .filter(|&idx| reserved[idx].is_none())
            .collect();

        let mut widths: Vec<usize> = reserved
            .iter()
            .map(|slot| slot.unwrap_or(0))
            .collect();

        if flexible.is_empty() {
            return widths;
        }

        let remaining = available.saturating_sub(reserved_total);
        let mins: Vec<usize> = flexible.iter().map(|&idx| measurements[idx].minimum).collect();
        let maxes: Vec<usize> = flexible.iter().map(|&idx| measurements[idx].maximum).collect();

        let min_total: usize = mins.iter().sum();
        if min_total > remaining {
            // Degenerate layout: pin everything at its minimum and let the
            // row overflow; downstream wrapping keeps output usable.
            log::debug!(
                "column minimums ({min_total}) exceed remaining width ({remaining}); degrading"
            );
            for (slot, &idx) in flexible.iter().enumerate() {
                widths[idx] = mins[slot];
            }
            return widths;
        }

        let shares = distribute(remaining, &maxes, &mins);
        for (slot, &idx) in flexible.iter().enumerate() {
            widths[idx] = shares[slot];
        }
        widths
    }

    fn render_line_set(
        &self,
        widths: &[usize],
        cell_lines: &[Vec<Vec<Segment>>],
        vertical: Option<(char, Style)>,
        segments: &mut Vec<Segment>,
    ) {
        let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

        for line_idx in 0..height {
            for (col_idx, lines) in cell_lines.iter().enumerate() {
                if let Some((ch, style)) = vertical {
                    segments.push(Segment::styled(ch.to_string(), style));
                }

                let padding = self.effective_padding(col_idx);
                if padding.left > 0 {
                    segments.push(Segment::plain(" ".repeat(padding.left)));
                }

                match lines.get(line_idx) {
                    Some(line) if !line.is_empty() => {
                        let used: usize = line.iter().map(Segment::cell_length).sum();
                        let alignment = self.columns[col_idx].alignment;
                        let shortfall = widths[col_idx].saturating_sub(used);
                        let (before, after) = match alignment {
                            Alignment::Left => (0, shortfall),
                            Alignment::Right => (shortfall, 0),
                            Alignment::Center => (shortfall / 2, shortfall - shortfall / 2),
                        };
                        if before > 0 {
                            segments.push(Segment::plain(" ".repeat(before)));
                        }
                        segments.extend(line.iter().cloned());
                        if after > 0 {
                            segments.push(Segment::plain(" ".repeat(after)));
                        }
                    }
                    _ => {
                        if widths[col_idx] > 0 {
                            segments.push(Segment::plain(" ".repeat(widths[col_idx])));
                        }
                    }
                }

                if padding.right > 0 {
                    segments.push(Segment::plain(" ".repeat(padding.right)));
                }
            }

            if let Some((ch, style)) = vertical {
                segments.push(Segment::styled(ch.to_string(), style));
            }
            segments.push(Segment::line());
        }
    }

    fn slot_widths(&self, widths: &[usize]) -> Vec<usize> {
        widths
            .iter()
            .enumerate()
            .map(|(idx, &w)| {
                let pad = self.effective_padding(idx);
                pad.left + w + pad.right
            })
            .collect()
    }
}

impl Renderable for Table {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        if max_width == 0 || self.columns.is_empty() {
            return Measurement::zero();
        }

        let overhead = self.overhead();
        let available = max_width.saturating_sub(overhead);
        let per_column = self.measure_columns(context, available);

        measure_sum(&per_column).add(overhead).with_maximum(max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        if width == 0 || self.columns.is_empty() {
            return Vec::new();
        }

        let widths = self.column_widths(context, width);
        let border = self.border.chars(context.ascii_only());
        let vertical = border.map(|b| (b.vertical, self.border_style));
        let slots = self.slot_widths(&widths);

        let mut segments = Vec::new();

        if let Some(chars) = border {
            segments.push(Segment::styled(
                chars.build_row(BorderRow::Top, &slots),
                self.border_style,
            ));
            segments.push(Segment::line());
        }

        if self.headers_visible() {
            let header_lines: Vec<Vec<Vec<Segment>>> = self
                .columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let style = self.header_style.combine(&column.header_style);
                    let header = column.header.clone().style(style).alignment(column.alignment);
                    split_lines(header.render(context, widths[idx]))
                })
                .collect();
            self.render_line_set(&widths, &header_lines, vertical, &mut segments);

            if let Some(chars) = border {
                segments.push(Segment::styled(
                    chars.build_row(BorderRow::HeadRow, &slots),
                    self.border_style,
                ));
                segments.push(Segment::line());
            }
        }

        for row in &self.rows {
            let cell_lines: Vec<Vec<Vec<Segment>>> = row
                .iter()
                .enumerate()
                .map(|(idx, cell)| split_lines(cell.render(context, widths[idx])))
                .collect();
            self.render_line_set(&widths, &cell_lines, vertical, &mut segments);
        }

        if let Some(chars) = border {
            segments.push(Segment::styled(
                chars.build_row(BorderRow::Bottom, &slots),
                self.border_style,
            ));
            segments.push(Segment::line());
        }

        segments
    }
}

/// Split `total` among flexible columns proportionally to `maxes`, exactly.
///
/// Integer shares use fraction arithmetic with the remainder handed to the
/// leftmost columns, so the result always sums to `total`. Columns whose
/// proportional share falls below their minimum are pinned at the minimum
/// and the rest of the budget is redistributed among the others.
/// Precondition: `sum(mins) <= total`.
fn distribute(total: usize, maxes: &[usize], mins: &[usize]) -> Vec<usize> {
    let n = maxes.len();
    let mut result = vec![0usize; n];
    let mut pinned = vec![false; n];
    let mut budget = total;

    loop {
        let active: Vec<usize> = (0..n).filter(|&i| !pinned[i]).collect();
        if active.is_empty() {
            break;
        }

        let weights: Vec<usize> = active.iter().map(|&i| maxes[i].max(1)).collect();
        let shares = ratio_split(budget, &weights);

        let mut pinned_this_round = false;
        for (slot, &i) in active.iter().enumerate() {
            if shares[slot] < mins[i] {
                pinned[i] = true;
                result[i] = mins[i];
                budget = budget.saturating_sub(mins[i]);
                pinned_this_round = true;
            }
        }

        if !pinned_this_round {
            for (slot, &i) in active.iter().enumerate() {
                result[i] = shares[slot];
            }
            break;
        }
    }

    result
}

/// Split `total` proportionally to `weights`; the integer remainder goes
/// to the first entries so the parts always sum to `total`.
fn ratio_split(total: usize, weights: &[usize]) -> Vec<usize> {
    let weight_sum: usize = weights.iter().sum();
    if weight_sum == 0 {
        return vec![0; weights.len()];
    }

    let mut parts: Vec<usize> = weights
        .iter()
        .map(|&w| Ratio::new(w * total, weight_sum).floor().to_integer())
        .collect();

    let assigned: usize = parts.iter().sum();
    for part in parts.iter_mut().take(total - assigned) {
        *part += 1;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::cell_len;
    use crate::segment::segments_to_plain;

    fn grid_like_table() -> Table {
        Table::new().grid_mode()
    }

    fn plain_column() -> TableColumn {
        TableColumn::new("").padding(0, 0)
    }

    #[test]
    fn test_ratio_split_exact() {
        assert_eq!(ratio_split(20, &[1, 1]), vec![10, 10]);
        assert_eq!(ratio_split(10, &[1, 1, 1]), vec![4, 3, 3]);
        assert_eq!(ratio_split(7, &[2, 1]), vec![5, 2]);
    }

    #[test]
    fn test_ratio_split_sums_to_total() {
        let weights = [3, 7, 11, 2, 5];
        for total in 0..100 {
            let parts = ratio_split(total, &weights);
            let sum: usize = parts.iter().sum();
            assert_eq!(sum, total);
        }
    }

    #[test]
    fn test_distribute_respects_minimums() {
        // Proportional share of the first column would be tiny; it must be
        // raised to its minimum.
        let shares = distribute(10, &[1, 100], &[4, 0]);
        assert_eq!(shares.iter().sum::<usize>(), 10);
        assert!(shares[0] >= 4);
    }

    #[test]
    fn test_two_flexible_columns_split_evenly() {
        let ctx = RenderContext::new(20);
        let mut table = grid_like_table()
            .with_column(plain_column())
            .with_column(plain_column());
        table.add_row_cells(["a", "b"]);

        let widths = table.column_widths(&ctx, 20);
        assert_eq!(widths, vec![10, 10]);
    }

    #[test]
    fn test_fixed_plus_flexible() {
        let ctx = RenderContext::new(20);
        let mut table = grid_like_table()
            .with_column(plain_column().width(6))
            .with_column(plain_column());
        table.add_row_cells(["a", "b"]);

        let widths = table.column_widths(&ctx, 20);
        assert_eq!(widths, vec![6, 14]);
    }

    #[test]
    fn test_add_column_after_rows_panics() {
        let mut table = grid_like_table().with_column(plain_column());
        table.add_row_cells(["x"]);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            table.add_column(plain_column());
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_row_arity_mismatch_panics() {
        let mut table = grid_like_table()
            .with_column(plain_column())
            .with_column(plain_column());

        let too_few = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            table.add_row_cells(["only one"]);
        }));
        assert!(too_few.is_err());

        let too_many = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            table.add_row_cells(["a", "b", "c"]);
        }));
        assert!(too_many.is_err());
    }

    #[test]
    fn test_render_line_widths_are_exact() {
        let ctx = RenderContext::new(20);
        let mut table = grid_like_table()
            .with_column(plain_column())
            .with_column(plain_column());
        table.add_row_cells(["left", "right"]);

        let output = segments_to_plain(&table.render(&ctx, 20));
        for line in output.lines() {
            assert_eq!(cell_len(line), 20, "line {line:?}");
        }
    }

    #[test]
    fn test_bordered_render_has_edges() {
        let ctx = RenderContext::new(30);
        let mut table = Table::new()
            .with_column(TableColumn::new("Name"))
            .with_column(TableColumn::new("Value"));
        table.add_row_cells(["a", "1"]);

        let output = segments_to_plain(&table.render(&ctx, 30));
        assert!(output.contains('┌'));
        assert!(output.contains('│'));
        assert!(output.contains('┘'));
        assert!(output.contains("Name"));
    }

    #[test]
    fn test_legacy_context_substitutes_ascii_border() {
        let ctx = RenderContext::legacy(30);
        let mut table = Table::new()
            .with_column(TableColumn::new("Name"))
            .with_column(TableColumn::new("Value"));
        table.add_row_cells(["a", "1"]);

        let output = segments_to_plain(&table.render(&ctx, 30));
        assert!(output.contains('+'));
        assert!(output.contains('|'));
        assert!(!output.contains('┌'));
    }

    #[test]
    fn test_headers_hidden_in_grid_mode() {
        let ctx = RenderContext::new(30);
        let mut table = grid_like_table()
            .with_column(TableColumn::new("Header").padding(0, 0))
            .show_headers(true);
        table.add_row_cells(["data"]);

        let output = segments_to_plain(&table.render(&ctx, 30));
        assert!(!output.contains("Header"));
        assert!(output.contains("data"));
    }

    #[test]
    fn test_zero_width_renders_nothing() {
        let ctx = RenderContext::new(0);
        let mut table = grid_like_table().with_column(plain_column());
        table.add_row_cells(["x"]);
        assert!(table.render(&ctx, 0).is_empty());
        assert_eq!(table.measure(&ctx, 0), Measurement::zero());
    }

    #[test]
    fn test_measure_includes_overhead() {
        let ctx = RenderContext::new(80);
        let mut table = Table::new()
            .show_headers(false)
            .with_column(TableColumn::new(""))
            .with_column(TableColumn::new(""));
        table.add_row_cells(["ab", "cd"]);

        // 2 cells of 2 + padding 4*1 + 3 border verticals = 11.
        let m = table.measure(&ctx, 80);
        assert_eq!(m.maximum, 11);
    }

    #[test]
    fn test_degenerate_width_does_not_panic() {
        let ctx = RenderContext::new(3);
        let mut table = grid_like_table()
            .with_column(plain_column())
            .with_column(plain_column());
        table.add_row_cells(["unbreakablecontent", "more"]);

        // Minimums cannot fit in 3 cells; render must still succeed.
        let segments = table.render(&ctx, 3);
        assert!(!segments.is_empty());
    }

    #[test]
    fn test_no_wrap_column_reserved_at_max() {
        let ctx = RenderContext::new(20);
        let mut table = grid_like_table()
            .with_column(plain_column().no_wrap())
            .with_column(plain_column());
        table.add_row_cells(["fixed part", "flex"]);

        let widths = table.column_widths(&ctx, 20);
        assert_eq!(widths[0], 10); // "fixed part" never wraps
        assert_eq!(widths[1], 10);
    }

    #[test]
    fn test_add_empty_row() {
        let mut table = grid_like_table()
            .with_column(plain_column())
            .with_column(plain_column());
        table.add_empty_row();
        assert_eq!(table.row_count(), 1);

        let ctx = RenderContext::new(10);
        let output = segments_to_plain(&table.render(&ctx, 10));
        assert_eq!(output.trim_end_matches('\n'), " ".repeat(10));
    }
}
