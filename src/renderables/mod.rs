//! Renderable widgets and the measure/render contract they share.
//!
//! Everything the layout engine composes — tables, grids, text, progress
//! rows — implements [`Renderable`]: report a width range, then produce
//! segments at a concrete width. The two calls form a protocol:
//!
//! 1. `measure` is pure. No animation advances, no shared state moves.
//! 2. `render(ctx, w)` for any `w` within the measured range (clamped to
//!    the context cap) fits inside `w` cells per line. It may advance
//!    per-task animation state; the driver calls it once per frame.
//!
//! A zero width cap yields degenerate measurements and empty output rather
//! than an error, so a momentarily zero-sized terminal keeps the pipeline
//! alive.

use crate::context::RenderContext;
use crate::measure::Measurement;
use crate::segment::Segment;
use crate::text::Text;

/// A widget that can negotiate a width and render itself to segments.
pub trait Renderable {
    /// Report the narrowest and widest acceptable rendering widths under
    /// the given cap. Must be pure.
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement;

    /// Produce one pass of output at a concrete width. Line boundaries are
    /// explicit [`Segment::line`] markers.
    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment>;
}

/// A heap-allocated renderable usable as a table cell.
pub type BoxedRenderable = Box<dyn Renderable + Send + Sync>;

pub mod border;
pub mod grid;
pub mod progress;
pub mod table;

pub use border::BorderKind;
pub use grid::{Grid, GridColumn};
pub use progress::{
    DescriptionColumn, ElapsedColumn, PercentageColumn, Progress, ProgressColumn, ProgressTask,
    SpinnerColumn, TaskSnapshot,
};
pub use table::{ColumnPadding, Table, TableColumn};

impl Renderable for str {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        Text::new(self).measure(context, max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        Text::new(self).render(context, width)
    }
}

impl Renderable for String {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        self.as_str().measure(context, max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        self.as_str().render(context, width)
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        (*self).measure(context, max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        (*self).render(context, width)
    }
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        self.as_ref().measure(context, max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        self.as_ref().render(context, width)
    }
}

impl<T: Renderable + ?Sized> Renderable for std::sync::Arc<T> {
    fn measure(&self, context: &RenderContext, max_width: usize) -> Measurement {
        self.as_ref().measure(context, max_width)
    }

    fn render(&self, context: &RenderContext, width: usize) -> Vec<Segment> {
        self.as_ref().render(context, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segments_to_plain;

    #[test]
    fn test_str_renders_via_text() {
        let ctx = RenderContext::new(80);
        let segments = "hello".render(&ctx, 5);
        assert_eq!(segments_to_plain(&segments), "hello");
    }

    #[test]
    fn test_boxed_renderable_delegates() {
        let ctx = RenderContext::new(80);
        let boxed: BoxedRenderable = Box::new(Text::new("x"));
        assert_eq!(boxed.measure(&ctx, 10), Measurement::new(1, 1));
    }
}
