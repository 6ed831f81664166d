//! Generic attribute scanner
//!
//! Walks a tag's data left to right, one piece per call. A name followed by
//! the equals sign comes out as [`AttributeKind::Name`] and its value as a
//! separate [`AttributeKind::Value`] on the next call; a name without a
//! value is a [`AttributeKind::Flag`].

use super::span::{AttributeKind, AttributeSpan};
use super::MarkupSyntax;
use crate::core::scanner::Scanner;

/// Extract the next attribute piece from `data`
///
/// `origin` is added to the start offset. Returns `None` once only
/// attribute separators remain.
pub fn scan_attribute<'a>(syntax: &MarkupSyntax, data: &'a str, origin: usize) -> Option<AttributeSpan<'a>> {
    let separators = syntax.attribute_separators();
    let equals = syntax.equals();
    let mut scanner = Scanner::new(data);

    scanner.skip_separators(separators);
    if scanner.is_eof() {
        return None;
    }

    // Standalone value continuing the previous name
    if scanner.peek() == Some(equals) {
        scanner.advance(1);
        let after_equals = scanner.position();
        scanner.skip_separators(separators);

        if scanner.is_eof() {
            return Some(AttributeSpan {
                kind: AttributeKind::Value,
                span: "",
                start: origin + after_equals,
            });
        }

        let value_start = scanner.position();
        let value_end = scanner.find_outside_quotes_or_end(separators, syntax.quotes());
        return Some(AttributeSpan {
            kind: AttributeKind::Value,
            span: scanner.slice(value_start, value_end),
            start: origin + value_start,
        });
    }

    let name_start = scanner.position();
    let name_end = scanner
        .remaining()
        .bytes()
        .position(|b| b == equals || separators.contains(&b))
        .map_or(data.len(), |i| name_start + i);

    // Look past separators for the equals sign
    scanner.advance(name_end - name_start);
    scanner.skip_separators(separators);
    let kind = if scanner.peek() == Some(equals) {
        AttributeKind::Name
    } else {
        AttributeKind::Flag
    };

    Some(AttributeSpan {
        kind,
        span: scanner.slice(name_start, name_end),
        start: origin + name_start,
    })
}
