//! XML Attribute Tokenizer
//!
//! Splits a tag's data sub-span into attributes, one per call. Values are
//! returned raw (quotes included); use [`trim_value`] to strip the quotes.
//! No entity decoding happens here.

use super::scanner::{Scanner, QUOTES, WHITESPACE};
use super::token::{Token, TokenCategory};

const EQUALS: u8 = b'=';
const NAME_STOPS: &[u8] = b" \t\n\r=";

/// Extract the next attribute from a tag's data sub-span
///
/// `offset` is the absolute position of `data[0]`. Returns `None` once
/// only separators remain.
///
/// - `name="value"` yields name and raw value
/// - `name=` yields the name with an empty value (`has_value()` is true)
/// - `name` alone yields a flag (`has_value()` is false)
pub fn next_attribute(data: &str, offset: usize) -> Option<Token<'_>> {
    let mut scanner = Scanner::new(data);

    // Skip leading separators
    scanner.skip_separators(WHITESPACE);
    if scanner.is_eof() {
        return None;
    }

    let name_start = scanner.position();
    let name_end = scanner.find_any_or_end(NAME_STOPS);
    let name = scanner.slice(name_start, name_end);

    // Skip separators around '='
    scanner.advance(name_end - name_start);
    scanner.skip_separators(WHITESPACE);

    if scanner.peek() != Some(EQUALS) {
        // Flag attribute: the span covers the name only
        return Some(
            Token::new(TokenCategory::ATTRIBUTE, name, offset + name_start)
                .with_name(name, offset + name_start),
        );
    }

    scanner.advance(1); // Skip '='
    let after_equals = scanner.position();
    scanner.skip_separators(WHITESPACE);

    let token = if scanner.is_eof() {
        // '=' present but the value is missing
        Token::new(
            TokenCategory::ATTRIBUTE,
            scanner.slice(name_start, after_equals),
            offset + name_start,
        )
        .with_data("", offset + after_equals)
    } else {
        let value_start = scanner.position();
        let value_end = scanner.find_outside_quotes_or_end(WHITESPACE, QUOTES);
        Token::new(
            TokenCategory::ATTRIBUTE,
            scanner.slice(name_start, value_end),
            offset + name_start,
        )
        .with_data(scanner.slice(value_start, value_end), offset + value_start)
    };

    Some(token.with_name(name, offset + name_start))
}

/// Strip quotation marks from both ends of an attribute value
///
/// Idempotent: every leading and trailing quote is removed, so trimming an
/// already-trimmed value is a no-op.
#[inline]
pub fn trim_value(value: &str) -> &str {
    trim_quotes(value, QUOTES)
}

/// Strip any of `quotes` from both ends of `value`
#[inline]
pub fn trim_quotes<'a>(value: &'a str, quotes: &[u8]) -> &'a str {
    value.trim_matches(|c: char| c.is_ascii() && quotes.contains(&(c as u8)))
}
