//! Unicode cell width calculations.
//!
//! Terminal layout negotiates in cells, not bytes or chars: CJK glyphs and
//! many emoji occupy two cells, control characters occupy none. Everything
//! in the layout engine that talks about "width" means cell width as
//! computed here.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use unicode_width::UnicodeWidthChar;

/// Strings shorter than this are measured directly; caching them costs more
/// than recomputing.
const CACHE_MIN_LEN: usize = 8;

static WIDTH_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide; CJK characters and some emoji are 2.
/// Control characters have 0 width.
#[must_use]
pub fn char_cell_size(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_width(text: &str) -> usize {
    text.chars().map(char_cell_size).sum()
}

/// Get the total cell width of a string.
///
/// Longer strings are cached in an LRU cache since tables re-measure the
/// same cell text on every pass.
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_width(text);
    }

    if let Ok(mut cache) = WIDTH_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_width(text);

    if let Ok(mut cache) = WIDTH_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Truncate a string to a maximum cell width.
///
/// Returns the truncated string and the width it actually occupies, which
/// may be one less than `max_width` when a wide character did not fit.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> (String, usize) {
    let mut width = 0;
    let mut result = String::new();

    for c in text.chars() {
        let char_width = char_cell_size(c);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        result.push(c);
    }

    (result, width)
}

/// Pad or truncate a string to occupy exactly `total` cells.
#[must_use]
pub fn set_cell_size(text: &str, total: usize) -> String {
    let current = cell_len(text);

    if current == total {
        return text.to_string();
    }

    if current < total {
        return format!("{text}{}", " ".repeat(total - current));
    }

    let (truncated, width) = truncate_to_width(text, total);
    if width < total {
        format!("{truncated}{}", " ".repeat(total - width))
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(cell_len("hello"), 5);
        assert_eq!(cell_len(""), 0);
    }

    #[test]
    fn test_wide_chars() {
        assert_eq!(char_cell_size('界'), 2);
        assert_eq!(cell_len("世界"), 4);
        assert_eq!(cell_len("a世b"), 4);
    }

    #[test]
    fn test_control_chars_zero_width() {
        assert_eq!(char_cell_size('\u{0}'), 0);
        assert_eq!(cell_len("a\u{7}b"), 2);
    }

    #[test]
    fn test_cached_path_matches_uncached() {
        let long = "a long string, longer than the cache threshold 世界";
        let first = cell_len(long);
        let second = cell_len(long);
        assert_eq!(first, second);
        assert_eq!(first, compute_width(long));
    }

    #[test]
    fn test_truncate_to_width() {
        let (s, w) = truncate_to_width("hello", 3);
        assert_eq!(s, "hel");
        assert_eq!(w, 3);

        // Wide char that doesn't fit is dropped entirely.
        let (s, w) = truncate_to_width("a世", 2);
        assert_eq!(s, "a");
        assert_eq!(w, 1);
    }

    #[test]
    fn test_set_cell_size_pads() {
        assert_eq!(set_cell_size("ab", 4), "ab  ");
        assert_eq!(set_cell_size("ab", 2), "ab");
    }

    #[test]
    fn test_set_cell_size_truncates_and_pads_wide() {
        // "世界" is 4 cells; cutting to 3 leaves "世" (2 cells) plus a space.
        assert_eq!(set_cell_size("世界", 3), "世 ");
    }
}
