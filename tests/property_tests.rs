//! Property-based tests.
//!
//! Verifies the layout and animation invariants with generated cases:
//! allocation exactness, measurement normalization, and the spinner's
//! time-partition independence.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;

use weft::cells::cell_len;
use weft::prelude::*;
use weft::segment::segments_to_plain;

fn bare_column() -> TableColumn {
    TableColumn::new("").padding(0, 0)
}

proptest! {
    /// With flexible columns whose minimums fit, allocated widths sum to
    /// exactly the available width - no rounding shortfall or excess.
    #[test]
    fn prop_flexible_allocation_fills_width_exactly(
        cell_lens in prop::collection::vec(0usize..5, 1..5),
        width in 30usize..70,
    ) {
        let ctx = RenderContext::new(width);
        let mut table = Table::new().border(BorderKind::None).show_headers(false);
        for _ in &cell_lens {
            table.add_column(bare_column());
        }
        table.add_row_cells(cell_lens.iter().map(|&len| "x".repeat(len)));

        let output = segments_to_plain(&table.render(&ctx, width));
        for line in output.lines() {
            prop_assert_eq!(cell_len(line), width);
        }
    }

    /// Measurement construction always normalizes to min <= max, and the
    /// clamp helpers preserve that invariant.
    #[test]
    fn prop_measurement_invariant_holds(
        a in 0usize..10_000,
        b in 0usize..10_000,
        cap in 0usize..10_000,
    ) {
        let m = Measurement::new(a, b);
        prop_assert!(m.minimum <= m.maximum);

        let capped = m.with_maximum(cap);
        prop_assert!(capped.minimum <= capped.maximum);
        prop_assert!(capped.maximum <= cap);

        let raised = m.with_minimum(cap);
        prop_assert!(raised.minimum <= raised.maximum);
        prop_assert!(raised.minimum >= cap);
    }

    /// The visible spinner frame depends only on the total accumulated
    /// time, not on how it was split across render calls.
    #[test]
    fn prop_spinner_frame_is_partition_independent(
        chunks in prop::collection::vec(1u64..250, 1..15),
        interval_ms in 20u64..200,
    ) {
        let ctx = RenderContext::new(80);
        let frames: Vec<&'static str> = vec!["0", "1", "2", "3", "4"];
        let spinner = Arc::new(Spinner::new(
            frames.clone(),
            Duration::from_millis(interval_ms),
            false,
        ));

        let column = SpinnerColumn::with_spinner(spinner);
        let progress = Progress::with_columns(vec![]);
        let task = progress.add_task("spin");

        let mut last = String::new();
        for &chunk in &chunks {
            let cell = column.render(&ctx, &task.snapshot(), Duration::from_millis(chunk));
            last = segments_to_plain(&cell.render(&ctx, 1));
        }

        let total: u64 = chunks.iter().sum();
        let expected_index = (total / interval_ms) as usize % frames.len();
        prop_assert_eq!(last, frames[expected_index].to_string());
    }

    /// Repeated get calls without an intervening update observe the same
    /// value.
    #[test]
    fn prop_state_get_is_idempotent(value in any::<i64>()) {
        let state = TaskState::new();
        state.update::<i64>("slot", |_| value);
        let first = state.get::<i64>("slot");
        let second = state.get::<i64>("slot");
        prop_assert_eq!(first, value);
        prop_assert_eq!(second, value);
    }

    /// A fold of updates equals the sequential application of the same
    /// closures.
    #[test]
    fn prop_state_update_folds(increments in prop::collection::vec(-100i64..100, 0..40)) {
        let state = TaskState::new();
        for &inc in &increments {
            state.update::<i64>("acc", move |v| v + inc);
        }
        let expected: i64 = increments.iter().sum();
        prop_assert_eq!(state.get::<i64>("acc"), expected);
    }

    /// Text rendering never exceeds the requested width.
    #[test]
    fn prop_text_render_fits_width(
        words in prop::collection::vec("[a-z]{1,12}", 1..8),
        width in 1usize..30,
    ) {
        let ctx = RenderContext::new(width);
        let text = Text::new(words.join(" "));
        let segments = text.render(&ctx, width);
        for line in weft::segment::split_lines(segments) {
            let total: usize = line.iter().map(Segment::cell_length).sum();
            prop_assert!(total <= width, "line width {} > {}", total, width);
        }
    }
}
