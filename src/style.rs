//! Style values attached to rendered output.
//!
//! A [`Style`] is an already-resolved description of how a run of text
//! should look: optional foreground/background color plus attribute flags.
//! The layout engine only carries styles through to the output segments;
//! turning them into escape sequences is a downstream concern.

use bitflags::bitflags;

/// A terminal color.
///
/// Either one of the 16 standard colors or a direct RGB triplet. Palette
/// down-sampling for terminals that cannot display RGB happens downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// Direct 24-bit color.
    Rgb(u8, u8, u8),
}

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold/bright text.
        const BOLD      = 1 << 0;
        /// Dim/faint text.
        const DIM       = 1 << 1;
        /// Italic text.
        const ITALIC    = 1 << 2;
        /// Underlined text.
        const UNDERLINE = 1 << 3;
        /// Reverse video.
        const REVERSE   = 1 << 4;
        /// Strikethrough text.
        const STRIKE    = 1 << 5;
    }
}

/// Visual style for a run of terminal text.
///
/// Styles combine with `combine`, where the right-hand side takes
/// precedence for conflicting properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub color: Option<Color>,
    /// Background color.
    pub bgcolor: Option<Color>,
    /// Enabled attributes.
    pub attributes: Attributes,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bgcolor(mut self, color: Color) -> Self {
        self.bgcolor = Some(color);
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.attributes.insert(Attributes::BOLD);
        self
    }

    /// Enable dim/faint text.
    #[must_use]
    pub fn dim(mut self) -> Self {
        self.attributes.insert(Attributes::DIM);
        self
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.attributes.insert(Attributes::ITALIC);
        self
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(mut self) -> Self {
        self.attributes.insert(Attributes::UNDERLINE);
        self
    }

    /// Enable reverse video.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.attributes.insert(Attributes::REVERSE);
        self
    }

    /// Enable strikethrough text.
    #[must_use]
    pub fn strike(mut self) -> Self {
        self.attributes.insert(Attributes::STRIKE);
        self
    }

    /// Check whether the style sets nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.bgcolor.is_none() && self.attributes.is_empty()
    }

    /// Combine two styles; `other` wins where both set a property.
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            color: other.color.or(self.color),
            bgcolor: other.bgcolor.or(self.bgcolor),
            attributes: self.attributes | other.attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(Style::new().is_empty());
        assert!(!Style::new().bold().is_empty());
    }

    #[test]
    fn test_builder_chains() {
        let style = Style::new().color(Color::Yellow).bold().underline();
        assert_eq!(style.color, Some(Color::Yellow));
        assert!(style.attributes.contains(Attributes::BOLD));
        assert!(style.attributes.contains(Attributes::UNDERLINE));
        assert!(!style.attributes.contains(Attributes::DIM));
    }

    #[test]
    fn test_combine_right_wins() {
        let base = Style::new().color(Color::Red).bold();
        let over = Style::new().color(Color::Green);
        let combined = base.combine(&over);
        assert_eq!(combined.color, Some(Color::Green));
        assert!(combined.attributes.contains(Attributes::BOLD));
    }

    #[test]
    fn test_combine_keeps_unset() {
        let base = Style::new().bgcolor(Color::Rgb(10, 20, 30));
        let combined = base.combine(&Style::new().italic());
        assert_eq!(combined.bgcolor, Some(Color::Rgb(10, 20, 30)));
        assert!(combined.attributes.contains(Attributes::ITALIC));
    }
}
