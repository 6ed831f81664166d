//! Span types produced by the generic scanner
//!
//! Same borrowing rules as [`Token`](crate::core::token::Token): views into
//! the caller's buffer, with `start` measured from the scan origin.

use crate::core::token::TokenCategory;
use bitflags::bitflags;

bitflags! {
    /// Category of a [`TagSpan`]
    ///
    /// Bit values line up with [`TokenCategory`] so both engines share one
    /// taxonomy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TagKind: u16 {
        const DISCARDED = 1 << 0;
        const CONTENT = 1 << 1;
        const OPENING = 1 << 2;
        const CLOSING = 1 << 3;
        const UNPAIRED = 1 << 4;
        const COMMENT = 1 << 5;
        const SECTION = 1 << 6;
    }
}

impl From<TagKind> for TokenCategory {
    #[inline]
    fn from(kind: TagKind) -> Self {
        TokenCategory::from_bits_truncate(kind.bits())
    }
}

/// One lexical unit found by the generic scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpan<'a> {
    pub kind: TagKind,
    pub span: &'a str,
    /// Offset of `span` relative to the scan origin
    pub start: usize,
    pub name: &'a str,
    pub name_start: Option<usize>,
    pub data: &'a str,
    pub data_start: Option<usize>,
}

impl<'a> TagSpan<'a> {
    #[inline]
    pub(crate) fn new(kind: TagKind, span: &'a str, start: usize) -> Self {
        TagSpan {
            kind,
            span,
            start,
            name: "",
            name_start: None,
            data: "",
            data_start: None,
        }
    }

    #[inline]
    pub(crate) fn with_name(mut self, name: &'a str, start: usize) -> Self {
        self.name = name;
        self.name_start = Some(start);
        self
    }

    #[inline]
    pub(crate) fn with_data(mut self, data: &'a str, start: usize) -> Self {
        self.data = data;
        self.data_start = Some(start);
        self
    }

    /// Offset one past the end of the span
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.span.len()
    }

    #[inline]
    pub fn is_discarded(&self) -> bool {
        self.kind.contains(TagKind::DISCARDED)
    }

    /// Category in the shared token taxonomy
    #[inline]
    pub fn category(&self) -> TokenCategory {
        self.kind.into()
    }
}

/// Role of an [`AttributeSpan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Attribute name followed by `=`; its value is the next span
    Name,
    /// `=`-prefixed value continuing the previous name
    Value,
    /// Name without a value
    Flag,
}

/// One attribute piece found by the generic attribute scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpan<'a> {
    pub kind: AttributeKind,
    pub span: &'a str,
    /// Offset of `span` relative to the scan origin
    pub start: usize,
}

impl AttributeSpan<'_> {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.span.len()
    }
}
