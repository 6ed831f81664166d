//! Quote-aware span search using memchr
//!
//! The primitives here look for delimiter bytes in a span while tracking
//! whether the current position is inside a quoted value. All stop and quote
//! characters are ASCII, so every index returned is a valid `char` boundary
//! of the `&str` the bytes came from.
//!
//! Plain (quote-unaware) searches go through memchr for SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use super::unicode::is_whitespace_byte;
use memchr::{memchr, memmem};
use std::borrow::Cow;

/// Markup whitespace as a separator set
pub const WHITESPACE: &[u8] = b" \t\n\r";

/// Both quotation marks, double quote first
pub const QUOTES: &[u8] = b"\"'";

/// Pick the quote byte that toggles state for a whole scan.
///
/// If the edge byte is one of the candidates it wins, otherwise the first
/// candidate is used. No candidates means no quote tracking at all.
#[inline]
fn pick_quote(edge: Option<u8>, quotes: &[u8]) -> Option<u8> {
    match edge {
        Some(b) if quotes.contains(&b) => Some(b),
        _ => quotes.first().copied(),
    }
}

/// Find the first stop byte that is not inside quotes
///
/// The active quote character is chosen from the first byte of `span`,
/// so a stop byte embedded in a value quoted with that same character is
/// never matched.
pub fn index_of_any_outside_quotes(span: &[u8], stops: &[u8], quotes: &[u8]) -> Option<usize> {
    let quote = pick_quote(span.first().copied(), quotes);
    let mut inside = false;

    for (i, &b) in span.iter().enumerate() {
        if Some(b) == quote {
            inside = !inside;
        } else if !inside && stops.contains(&b) {
            return Some(i);
        }
    }
    None
}

/// Find the first occurrence of a single stop byte outside quotes
#[inline]
pub fn index_of_outside_quotes(span: &[u8], stop: u8, quotes: &[u8]) -> Option<usize> {
    index_of_any_outside_quotes(span, &[stop], quotes)
}

/// Find the last stop byte that is not inside quotes, scanning backwards
///
/// `starts_inside` resumes a toggling state that began earlier in the full
/// input. In that case a quote byte at the edge is assumed to belong to the
/// value already open, so the other candidate becomes the active quote.
pub fn last_index_of_any_outside_quotes(
    span: &[u8],
    stops: &[u8],
    quotes: &[u8],
    starts_inside: bool,
) -> Option<usize> {
    let edge = span.last().copied();
    let quote = match edge {
        Some(b) if starts_inside && quotes.contains(&b) => {
            quotes.iter().copied().find(|&q| q != b).or(Some(b))
        }
        _ => pick_quote(edge, quotes),
    };
    let mut inside = starts_inside;

    for (i, &b) in span.iter().enumerate().rev() {
        if Some(b) == quote {
            inside = !inside;
        } else if !inside && stops.contains(&b) {
            return Some(i);
        }
    }
    None
}

/// Find next occurrence of a byte using SIMD
#[inline]
pub fn find_byte(span: &[u8], byte: u8) -> Option<usize> {
    memchr(byte, span)
}

/// Find next occurrence of a literal (comment/section closers)
#[inline]
pub fn find_literal(span: &[u8], literal: &[u8]) -> Option<usize> {
    memmem::find(span, literal)
}

/// Index of the first byte at or after `from` that is not a separator
#[inline]
pub fn skip_separators(span: &[u8], from: usize, separators: &[u8]) -> usize {
    let mut pos = from;
    while pos < span.len() && separators.contains(&span[pos]) {
        pos += 1;
    }
    pos
}

/// Trim separators off both ends, returning the trimmed text and how many
/// bytes were removed from the front
pub fn trim_separators<'a>(text: &'a str, separators: &[u8]) -> (&'a str, usize) {
    let bytes = text.as_bytes();
    let start = skip_separators(bytes, 0, separators);
    let mut end = bytes.len();
    while end > start && separators.contains(&bytes[end - 1]) {
        end -= 1;
    }
    (&text[start..end], start)
}

/// Collapse every interior whitespace run into a single `fill`
///
/// Leading and trailing runs are dropped entirely. Text without any
/// whitespace is returned borrowed; otherwise output is appended one
/// non-whitespace run at a time.
pub fn normalize_whitespace<'a>(text: &'a str, fill: &str) -> Cow<'a, str> {
    let bytes = text.as_bytes();
    if !bytes.iter().any(|&b| is_whitespace_byte(b)) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < bytes.len() {
        let run_start = pos;
        while pos < bytes.len() && is_whitespace_byte(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        if run_start != pos && !out.is_empty() {
            out.push_str(fill);
        }

        let word_start = pos;
        while pos < bytes.len() && !is_whitespace_byte(bytes[pos]) {
            pos += 1;
        }
        out.push_str(&text[word_start..pos]);
    }

    Cow::Owned(out)
}

/// Cursor over a `&str` for the attribute tokenizers
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining text
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Skip bytes contained in `separators`
    #[inline]
    pub fn skip_separators(&mut self, separators: &[u8]) {
        self.pos = skip_separators(self.input.as_bytes(), self.pos, separators);
    }

    /// Absolute position of the next byte in `stops`, or end of input
    #[inline]
    pub fn find_any_or_end(&self, stops: &[u8]) -> usize {
        self.remaining()
            .bytes()
            .position(|b| stops.contains(&b))
            .map_or(self.input.len(), |i| self.pos + i)
    }

    /// Absolute position of the next unquoted byte in `stops`, or end of input
    #[inline]
    pub fn find_outside_quotes_or_end(&self, stops: &[u8], quotes: &[u8]) -> usize {
        index_of_any_outside_quotes(self.remaining().as_bytes(), stops, quotes)
            .map_or(self.input.len(), |i| self.pos + i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_inside_quotes_is_skipped() {
        assert_eq!(index_of_any_outside_quotes(b"a,'b,c',d", b",", b"'"), Some(1));
        assert_eq!(index_of_any_outside_quotes(b"'b,c',d", b",", b"'"), Some(5));
    }

    #[test]
    fn test_edge_char_selects_quote() {
        // Leading apostrophe makes ' the active quote; the " is inert.
        assert_eq!(index_of_any_outside_quotes(b"'a\"b'>", b">", QUOTES), Some(5));
        // Default is the first candidate.
        assert_eq!(index_of_any_outside_quotes(b"x=\"a>b\">", b">", QUOTES), Some(7));
        // Apostrophes are not tracked when " is active.
        assert_eq!(index_of_any_outside_quotes(b"x='a>b'>", b">", QUOTES), Some(4));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(index_of_any_outside_quotes(b"abc", b">", QUOTES), None);
        assert_eq!(index_of_any_outside_quotes(b"\"a>b", b">", QUOTES), None);
        assert_eq!(index_of_any_outside_quotes(b"", b">", QUOTES), None);
    }

    #[test]
    fn test_without_quotes() {
        assert_eq!(index_of_any_outside_quotes(b"\"a>b", b">", b""), Some(2));
        assert_eq!(index_of_outside_quotes(b"ab>c", b'>', QUOTES), Some(2));
    }

    #[test]
    fn test_last_index() {
        assert_eq!(last_index_of_any_outside_quotes(b"a,'b,c',d", b",", b"'", false), Some(7));
        assert_eq!(last_index_of_any_outside_quotes(b"a,'b,c'", b",", b"'", false), Some(1));
        assert_eq!(last_index_of_any_outside_quotes(b"abc", b",", b"'", false), None);
    }

    #[test]
    fn test_last_index_resuming_inside_quotes() {
        // Already inside a "-quoted value: the trailing ' belongs to it.
        assert_eq!(last_index_of_any_outside_quotes(b"a,\"b,c'", b",", QUOTES, true), Some(1));
        // Inside, no edge quote: first candidate toggles us out at the ".
        assert_eq!(last_index_of_any_outside_quotes(b"x,\"b,c", b",", QUOTES, true), Some(1));
    }

    #[test]
    fn test_find_helpers() {
        assert_eq!(find_byte(b"hello <world>", b'<'), Some(6));
        assert_eq!(find_literal(b"a -- b --> c", b"-->"), Some(7));
        assert_eq!(find_literal(b"a -- b", b"-->"), None);
    }

    #[test]
    fn test_trim_separators() {
        assert_eq!(trim_separators("  a b \t", WHITESPACE), ("a b", 2));
        assert_eq!(trim_separators("   ", WHITESPACE), ("", 3));
        assert_eq!(trim_separators("ab", WHITESPACE), ("ab", 0));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t\n b  c ", " "), "a b c");
        assert_eq!(normalize_whitespace("a\r\nb", "_"), "a_b");
        assert_eq!(normalize_whitespace(" \t ", " "), "");
        assert!(matches!(normalize_whitespace("abc", " "), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_scanner_cursor() {
        let mut scanner = Scanner::new("  id = 'a b' x");
        scanner.skip_separators(WHITESPACE);
        assert_eq!(scanner.position(), 2);
        assert_eq!(scanner.find_any_or_end(b"= "), 4);
        scanner.advance(5);
        scanner.skip_separators(WHITESPACE);
        assert_eq!(scanner.peek(), Some(b'\''));
        assert_eq!(scanner.find_outside_quotes_or_end(WHITESPACE, QUOTES), 12);
        assert_eq!(scanner.slice(7, 12), "'a b'");
    }
}
