//! # weft
//!
//! A composable layout engine for structured terminal output: tables,
//! grids, and live-updating progress rows, rendered under varying terminal
//! capabilities (Unicode vs. ASCII, modern vs. legacy consoles).
//!
//! ## Core Concepts
//!
//! - **Renderable**: the two-pass contract every widget implements -
//!   measure a width range, then render at a concrete width
//! - **Segment**: the atomic unit of output (styled text or an explicit
//!   line break marker)
//! - **RenderContext**: the per-frame capability snapshot (width, Unicode
//!   support, legacy console)
//! - **Table / Grid**: column-width negotiation and cell composition
//! - **Progress / TaskState**: per-task animated rows whose animation
//!   state survives across frames in a thread-safe store
//! - **RenderLoop**: the timer-driven driver thread that repeats
//!   measure+render and feeds a sink
//!
//! ## Quick Start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! let mut table = Table::new()
//!     .with_column(TableColumn::new("Name"))
//!     .with_column(TableColumn::new("Status"));
//! table.add_row_cells(["build", "ok"]);
//!
//! let ctx = RenderContext::new(40);
//! for segment in table.render(&ctx, 40) {
//!     print!("{segment}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cells;
pub mod config;
pub mod context;
pub mod driver;
pub mod measure;
pub mod renderables;
pub mod segment;
pub mod spinner;
pub mod state;
pub mod style;
pub mod sync;
pub mod text;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::config::{RenderConfig, RenderConfigBuilder};
    pub use crate::context::RenderContext;
    pub use crate::driver::{FrameSink, PlainSink, RenderLoop};
    pub use crate::measure::Measurement;
    pub use crate::renderables::{
        BorderKind, BoxedRenderable, DescriptionColumn, ElapsedColumn, Grid, GridColumn,
        PercentageColumn, Progress, ProgressColumn, ProgressTask, Renderable, SpinnerColumn,
        Table, TableColumn, TaskSnapshot,
    };
    pub use crate::segment::Segment;
    pub use crate::spinner::Spinner;
    pub use crate::state::TaskState;
    pub use crate::style::{Attributes, Color, Style};
    pub use crate::text::{Alignment, Text};
}

// Re-export key types at crate root
pub use context::RenderContext;
pub use measure::Measurement;
pub use renderables::Renderable;
pub use segment::Segment;
pub use style::{Attributes, Color, Style};
pub use text::Text;
