//! Spinner frame sets.
//!
//! A [`Spinner`] is an immutable animation definition: ordered frames, the
//! interval between frame advances, and whether the glyphs need Unicode.
//! Columns hold spinners behind an `Arc` so swapping one out is a pointer
//! swap that invalidates any cached width.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::cells::cell_len;

/// An immutable spinner animation definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    frames: Vec<&'static str>,
    interval: Duration,
    unicode: bool,
}

impl Spinner {
    /// Create a spinner from frames and a frame interval.
    ///
    /// # Panics
    ///
    /// Panics if `frames` is empty; a spinner with no frames cannot
    /// animate and indicates a caller bug.
    #[must_use]
    pub fn new(frames: Vec<&'static str>, interval: Duration, unicode: bool) -> Self {
        assert!(!frames.is_empty(), "spinner requires at least one frame");
        Self {
            frames,
            interval,
            unicode,
        }
    }

    /// The animation frames in order.
    #[must_use]
    pub fn frames(&self) -> &[&'static str] {
        &self.frames
    }

    /// The frame for a monotonically growing index, wrapping around.
    #[must_use]
    pub fn frame(&self, index: u64) -> &'static str {
        self.frames[(index % self.frames.len() as u64) as usize]
    }

    /// Time each frame stays visible.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the frames require Unicode glyphs.
    #[must_use]
    pub const fn is_unicode(&self) -> bool {
        self.unicode
    }

    /// Cell width of the widest frame.
    #[must_use]
    pub fn max_frame_width(&self) -> usize {
        self.frames.iter().copied().map(cell_len).max().unwrap_or(0)
    }
}

/// Named spinners.
pub mod known {
    use super::{Arc, Duration, Lazy, Spinner};

    /// Braille dots, the default for Unicode terminals.
    pub static DOTS: Lazy<Arc<Spinner>> = Lazy::new(|| {
        Arc::new(Spinner::new(
            vec!["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            Duration::from_millis(80),
            true,
        ))
    });

    /// Classic ASCII spinner, the substitution target on legacy terminals.
    pub static ASCII: Lazy<Arc<Spinner>> = Lazy::new(|| {
        Arc::new(Spinner::new(
            vec!["-", "\\", "|", "/"],
            Duration::from_millis(100),
            false,
        ))
    });

    /// Horizontal scanning line.
    pub static LINE: Lazy<Arc<Spinner>> = Lazy::new(|| {
        Arc::new(Spinner::new(
            vec!["⎺", "⎻", "⎼", "⎽", "⎼", "⎻"],
            Duration::from_millis(120),
            true,
        ))
    });

    /// Bouncing braille dot.
    pub static BOUNCE: Lazy<Arc<Spinner>> = Lazy::new(|| {
        Arc::new(Spinner::new(
            vec!["⠁", "⠂", "⠄", "⠂"],
            Duration::from_millis(120),
            true,
        ))
    });

    /// Default spinner.
    #[must_use]
    pub fn default() -> Arc<Spinner> {
        Arc::clone(&DOTS)
    }
}
