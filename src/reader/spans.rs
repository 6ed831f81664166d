//! Readers over the generic syntax-driven scanner

use crate::syntax::attributes::scan_attribute;
use crate::syntax::scanner::scan_tag;
use crate::syntax::{AttributeSpan, MarkupSyntax, TagKind, TagSpan};
use std::iter::FusedIterator;

/// Lazy sequence of tag spans for one dialect
#[derive(Debug, Clone)]
pub struct TagReader<'s, 'a> {
    syntax: &'s MarkupSyntax,
    input: &'a str,
    cursor: usize,
}

impl<'s, 'a> TagReader<'s, 'a> {
    pub fn new(syntax: &'s MarkupSyntax, input: &'a str) -> Self {
        TagReader {
            syntax,
            input,
            cursor: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Restart from the beginning
    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for TagReader<'_, 'a> {
    type Item = TagSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = scan_tag(self.syntax, &self.input[self.cursor..], self.cursor)?;
        self.cursor = tag.end();
        Some(tag)
    }
}

impl FusedIterator for TagReader<'_, '_> {}

/// Lazy sequence of attribute pieces for one dialect
///
/// Offsets are relative to the same origin as the tag the data came from.
#[derive(Debug, Clone)]
pub struct AttributeSpanReader<'s, 'a> {
    syntax: &'s MarkupSyntax,
    data: &'a str,
    origin: usize,
    cursor: usize,
}

impl<'s, 'a> AttributeSpanReader<'s, 'a> {
    pub fn new(syntax: &'s MarkupSyntax, data: &'a str, origin: usize) -> Self {
        AttributeSpanReader {
            syntax,
            data,
            origin,
            cursor: 0,
        }
    }

    /// Reader over a tag span's data
    ///
    /// Empty when the tag has no data or is not a well-formed tag.
    pub fn for_tag(syntax: &'s MarkupSyntax, tag: &TagSpan<'a>) -> Self {
        let is_tag = !tag.is_discarded() && tag.kind.intersects(TagKind::OPENING | TagKind::UNPAIRED);
        match tag.data_start {
            Some(start) if is_tag => Self::new(syntax, tag.data, start),
            _ => Self::new(syntax, "", tag.end()),
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for AttributeSpanReader<'_, 'a> {
    type Item = AttributeSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let attr = scan_attribute(self.syntax, &self.data[self.cursor..], self.origin + self.cursor)?;
        self.cursor = attr.end() - self.origin;
        Some(attr)
    }
}

impl FusedIterator for AttributeSpanReader<'_, '_> {}
