//! Plain styled text, the leaf of the renderable tree.
//!
//! A [`Text`] is a single styled run that knows how to wrap, truncate, and
//! align itself to a concrete width. Table cells, progress column output,
//! and headers all bottom out here.

use crate::cells::{self, cell_len};
use crate::context::RenderContext;
use crate::measure::Measurement;
use crate::renderables::Renderable;
use crate::segment::Segment;
use crate::style::Style;

/// Horizontal alignment within an allocated width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Center within the width.
    Center,
    /// Align to the right edge.
    Right,
}

/// A styled run of text.
#[derive(Debug, Clone, Default)]
pub struct Text {
    content: String,
    style: Option<Style>,
    alignment: Alignment,
    no_wrap: bool,
}

impl Text {
    /// Create unstyled text.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Create styled text.
    #[must_use]
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style: Some(style),
            ..Self::default()
        }
    }

    /// Create empty text.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The raw content.
    #[must_use]
    pub fn plain(&self) -> &str {
        &self.content
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the horizontal alignment.
    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Disable wrapping; overlong lines truncate instead.
    #[must_use]
    pub fn no_wrap(mut self) -> Self {
        self.no_wrap = true;
        self
    }

    /// Wrap the content to `width`, returning plain line strings.
    ///
    /// Embedded newlines start new lines; words longer than the width fold
    /// at cell boundaries. With wrapping disabled each input line truncates.
    #[must_use]
    pub fn wrap(&self, width: usize) -> Vec<String> {
        if width == 0 {
            return vec![String::new()];
        }

        let mut lines = Vec::new();
        for raw_line in self.content.split('\n') {
            if self.no_wrap {
                let (truncated, _) = cells::truncate_to_width(raw_line, width);
                lines.push(truncated);
            } else {
                wrap_words(raw_line, width, &mut lines);
            }
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn longest_line(&self) -> usize {
        self.content.split('\n').map(cell_len).max().unwrap_or(0)
    }

    fn longest_word(&self) -> usize {
        self.content
            .split_whitespace()
            .map(cell_len)
            .max()
            .unwrap_or(0)
    }
}

impl Renderable for Text {
    fn measure(&self, _context: &RenderContext, max_width: usize) -> Measurement {
        if max_width == 0 {
            return Measurement::zero();
        }

        let maximum = self.longest_line();
        let minimum = if self.no_wrap {
            maximum
        } else {
            self.longest_word()
        };

        Measurement::new(minimum, maximum).with_maximum(max_width)
    }

    fn render(&self, _context: &RenderContext, width: usize) -> Vec<Segment> {
        if width == 0 {
            return Vec::new();
        }

        let lines = self.wrap(width);
        let mut segments = Vec::with_capacity(lines.len() * 2);
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                segments.push(Segment::line());
            }
            let padded = align_line(line, width, self.alignment);
            segments.push(Segment::new(padded, self.style));
        }
        segments
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Pad a single line to exactly `width` cells under an alignment.
#[must_use]
pub fn align_line(line: &str, width: usize, alignment: Alignment) -> String {
    let line_width = cell_len(line);
    if line_width >= width {
        return cells::set_cell_size(line, width);
    }

    let space = width - line_width;
    match alignment {
        Alignment::Left => format!("{line}{}", " ".repeat(space)),
        Alignment::Right => format!("{}{line}", " ".repeat(space)),
        Alignment::Center => {
            let left = space / 2;
            format!("{}{line}{}", " ".repeat(left), " ".repeat(space - left))
        }
    }
}

fn wrap_words(raw_line: &str, width: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_width = 0;

    for word in raw_line.split_whitespace() {
        let word_width = cell_len(word);

        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }

        if current_width > 0 {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            // Fold an overlong word at cell boundaries.
            let mut rest = word;
            loop {
                let (chunk, chunk_width) = cells::truncate_to_width(rest, width);
                if chunk.is_empty() {
                    break;
                }
                rest = &rest[chunk.len()..];
                if rest.is_empty() {
                    current.push_str(&chunk);
                    current_width = chunk_width;
                    break;
                }
                lines.push(chunk);
            }
        }
    }

    lines.push(current);
}
