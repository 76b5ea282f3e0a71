//! Segment - the atomic rendering unit.
//!
//! A [`Segment`] is a run of text with a single style, or an explicit line
//! break marker. Render passes produce sequences of segments; consumers can
//! reason about line boundaries by looking at the markers instead of
//! re-scanning text for newline characters.

use std::fmt;

use crate::cells::cell_len;
use crate::style::Style;

/// The atomic unit of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    /// The text content. Empty for line break markers.
    pub text: String,
    /// The style to apply (None = unstyled).
    pub style: Option<Style>,
    /// Whether this segment marks the end of a visual line.
    pub line_break: bool,
}

impl Segment {
    /// Create a new segment with text and optional style.
    #[must_use]
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
            line_break: false,
        }
    }

    /// Create a segment with a style.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::new(text, Some(style))
    }

    /// Create a plain segment with no style.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// Create a line break marker.
    #[must_use]
    pub fn line() -> Self {
        Self {
            text: String::new(),
            style: None,
            line_break: true,
        }
    }

    /// Check if this segment is a line break marker.
    #[must_use]
    pub const fn is_line_break(&self) -> bool {
        self.line_break
    }

    /// Get the cell width of this segment. Line breaks have zero width.
    #[must_use]
    pub fn cell_length(&self) -> usize {
        if self.line_break { 0 } else { cell_len(&self.text) }
    }

    /// Check if this segment carries neither text nor a line break.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && !self.line_break
    }

    /// Apply a style, combining with any existing one (the new style acts
    /// as the base the existing style overrides).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        if !self.line_break {
            self.style = Some(match self.style {
                Some(existing) => style.combine(&existing),
                None => style,
            });
        }
        self
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Self::plain(value)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_break {
            writeln!(f)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Apply a base style under an iterator of segments.
///
/// Line break markers pass through untouched.
pub fn apply_style<I>(segments: I, style: &Style) -> Vec<Segment>
where
    I: IntoIterator<Item = Segment>,
{
    let style = *style;
    segments
        .into_iter()
        .map(move |seg| seg.with_style(style))
        .collect()
}

/// Group segments into lines at line break markers.
///
/// The markers themselves are consumed. Always returns at least one
/// (possibly empty) line.
#[must_use]
pub fn split_lines(segments: impl IntoIterator<Item = Segment>) -> Vec<Vec<Segment>> {
    let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];

    for segment in segments {
        if segment.is_line_break() {
            lines.push(Vec::new());
        } else if !segment.is_empty() {
            lines.last_mut().expect("at least one line").push(segment);
        }
    }

    lines
}

/// Total cell width of a sequence of segments on a single line.
#[must_use]
pub fn line_width(segments: &[Segment]) -> usize {
    segments.iter().map(Segment::cell_length).sum()
}

/// Collect segments into a plain string, rendering break markers as `\n`.
///
/// Intended for tests and debug output; styling is dropped.
#[must_use]
pub fn segments_to_plain(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_line_break() {
            out.push('\n');
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_segment_new() {
        let seg = Segment::plain("hello");
        assert_eq!(seg.text, "hello");
        assert!(seg.style.is_none());
        assert!(!seg.is_line_break());
        assert_eq!(seg.cell_length(), 5);
    }

    #[test]
    fn test_line_break_marker() {
        let brk = Segment::line();
        assert!(brk.is_line_break());
        assert_eq!(brk.cell_length(), 0);
        assert!(brk.text.is_empty());
    }

    #[test]
    fn test_with_style_combines() {
        let over = Style::new().color(Color::Red);
        let seg = Segment::styled("x", over).with_style(Style::new().bold());
        let style = seg.style.expect("style");
        // Existing segment style wins over the applied base.
        assert_eq!(style.color, Some(Color::Red));
        assert!(style.attributes.contains(crate::style::Attributes::BOLD));
    }

    #[test]
    fn test_with_style_skips_breaks() {
        let brk = Segment::line().with_style(Style::new().bold());
        assert!(brk.style.is_none());
    }

    #[test]
    fn test_split_lines() {
        let segments = vec![
            Segment::plain("one"),
            Segment::line(),
            Segment::plain("two"),
            Segment::plain(" more"),
            Segment::line(),
        ];
        let lines = split_lines(segments);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 1);
        assert_eq!(lines[1].len(), 2);
        assert!(lines[2].is_empty());
    }

    #[test]
    fn test_split_lines_empty() {
        let lines = split_lines(Vec::new());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }

    #[test]
    fn test_apply_style_skips_breaks() {
        let styled = apply_style(
            vec![Segment::plain("a"), Segment::line(), Segment::plain("b")],
            &Style::new().bold(),
        );
        assert!(styled[0].style.is_some());
        assert!(styled[1].style.is_none());
        assert!(styled[2].style.is_some());
    }

    #[test]
    fn test_segments_to_plain() {
        let segments = vec![
            Segment::plain("a"),
            Segment::line(),
            Segment::plain("b"),
        ];
        assert_eq!(segments_to_plain(&segments), "a\nb");
    }

    #[test]
    fn test_line_width() {
        let segments = vec![Segment::plain("ab"), Segment::plain("世")];
        assert_eq!(line_width(&segments), 4);
    }
}
