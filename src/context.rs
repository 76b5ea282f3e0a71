//! Render context - the capability snapshot every render pass consumes.
//!
//! A [`RenderContext`] is read-only for the duration of one measure+render
//! pass. The render driver builds a fresh one per frame (terminal width can
//! change between frames), widgets never mutate it.

use std::env;
use std::io::IsTerminal;

/// Terminal capabilities and constraints for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Running on a legacy console that cannot be trusted with styled
    /// Unicode output (old Windows conhost and `TERM=dumb` environments).
    pub legacy_console: bool,
    /// The terminal can display Unicode glyphs.
    pub unicode: bool,
    /// Width cap in cells for this pass.
    pub max_width: usize,
    /// Output goes to an interactive terminal rather than a pipe.
    pub interactive: bool,
}

impl RenderContext {
    /// Create a context with an explicit width and modern-terminal
    /// defaults. The form tests and headless callers use.
    #[must_use]
    pub const fn new(max_width: usize) -> Self {
        Self {
            legacy_console: false,
            unicode: true,
            max_width,
            interactive: false,
        }
    }

    /// Create a legacy, ASCII-only context with an explicit width.
    #[must_use]
    pub const fn legacy(max_width: usize) -> Self {
        Self {
            legacy_console: true,
            unicode: false,
            max_width,
            interactive: false,
        }
    }

    /// Snapshot the live terminal.
    ///
    /// Queries the terminal size through crossterm and applies environment
    /// heuristics for Unicode support and legacy consoles. Falls back to
    /// 80 columns when there is no terminal to query.
    #[must_use]
    pub fn detect() -> Self {
        let interactive = std::io::stdout().is_terminal();
        let max_width = crossterm::terminal::size()
            .ok()
            .map_or(80, |(w, _)| usize::from(w));

        let term = env::var("TERM").unwrap_or_default();
        let legacy_console = term == "dumb" || (cfg!(windows) && term.is_empty());
        let unicode = !legacy_console && detect_unicode_support();

        Self {
            legacy_console,
            unicode,
            max_width,
            interactive,
        }
    }

    /// Copy of this context with a different width cap.
    #[must_use]
    pub const fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Whether styled Unicode output should be avoided in this context.
    #[must_use]
    pub const fn ascii_only(&self) -> bool {
        self.legacy_console || !self.unicode
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(80)
    }
}

fn detect_unicode_support() -> bool {
    for key in ["LC_ALL", "LC_CTYPE", "LANG"] {
        if let Ok(value) = env::var(key)
            && !value.is_empty()
        {
            let value = value.to_ascii_uppercase();
            return value.contains("UTF-8") || value.contains("UTF8");
        }
    }
    // Windows Terminal always supports Unicode regardless of locale vars.
    env::var("WT_SESSION").is_ok()
}
