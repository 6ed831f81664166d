//! Token model
//!
//! A [`Token`] is a classified, non-owning view of one lexical unit. It
//! borrows the caller's buffer for `'a`, so it cannot outlive or observe a
//! mutation of that buffer.

use bitflags::bitflags;

bitflags! {
    /// Lexical category of a token
    ///
    /// `DISCARDED` is combined with the category the malformed input was
    /// tentatively recognised as, e.g. `DISCARDED | COMMENT`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenCategory: u16 {
        /// Malformed input kept as inert content
        const DISCARDED = 1 << 0;
        const CONTENT = 1 << 1;
        const OPENING_TAG = 1 << 2;
        const CLOSING_TAG = 1 << 3;
        /// Self-closing tag: `<br/>`
        const UNPAIRED_TAG = 1 << 4;
        const COMMENT = 1 << 5;
        /// CDATA-like section: `<![CDATA[...]]>`
        const SECTION = 1 << 6;
        /// `<!DOCTYPE ...>` and friends
        const DECLARATION = 1 << 7;
        /// Processing instruction: `<?target ...?>`
        const INSTRUCTION = 1 << 8;
        const ATTRIBUTE = 1 << 9;
    }
}

impl TokenCategory {
    /// Any of the tag-like categories
    pub const TAGS: Self = Self::OPENING_TAG
        .union(Self::CLOSING_TAG)
        .union(Self::UNPAIRED_TAG)
        .union(Self::DECLARATION)
        .union(Self::INSTRUCTION);

    /// Category with the `DISCARDED` flag removed
    #[inline]
    pub fn base(self) -> Self {
        self.difference(Self::DISCARDED)
    }
}

/// A classified lexical unit borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub category: TokenCategory,
    /// Exact characters of the token
    pub span: &'a str,
    /// Absolute offset of `span` in the original input
    pub offset: usize,
    /// Tag, section or attribute name
    pub name: &'a str,
    pub name_offset: Option<usize>,
    /// Raw attribute text (tags), inner text (sections, comments) or raw
    /// value (attributes)
    pub data: &'a str,
    pub data_offset: Option<usize>,
}

impl<'a> Token<'a> {
    /// Create a token with no name or data
    #[inline]
    pub fn new(category: TokenCategory, span: &'a str, offset: usize) -> Self {
        Token {
            category,
            span,
            offset,
            name: "",
            name_offset: None,
            data: "",
            data_offset: None,
        }
    }

    /// Plain content run
    #[inline]
    pub fn content(span: &'a str, offset: usize) -> Self {
        Self::new(TokenCategory::CONTENT, span, offset)
    }

    #[inline]
    pub(crate) fn with_name(mut self, name: &'a str, offset: usize) -> Self {
        self.name = name;
        self.name_offset = Some(offset);
        self
    }

    #[inline]
    pub(crate) fn with_data(mut self, data: &'a str, offset: usize) -> Self {
        self.data = data;
        self.data_offset = Some(offset);
        self
    }

    /// Absolute offset one past the last byte of the token
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.span.len()
    }

    /// True only for a content token that is empty or all whitespace
    pub fn is_empty(&self) -> bool {
        self.category == TokenCategory::CONTENT
            && self.span.bytes().all(super::unicode::is_whitespace_byte)
    }

    /// Check if the token is malformed input
    #[inline]
    pub fn is_discarded(&self) -> bool {
        self.category.contains(TokenCategory::DISCARDED)
    }

    /// Check if the token is a well-formed tag of any kind
    #[inline]
    pub fn is_tag(&self) -> bool {
        !self.is_discarded() && self.category.intersects(TokenCategory::TAGS)
    }

    /// For attributes: an `=` was present (the value itself may be empty)
    #[inline]
    pub fn has_value(&self) -> bool {
        self.data_offset.is_some()
    }

    /// Attribute value with surrounding quotes removed
    #[inline]
    pub fn trimmed_value(&self) -> &'a str {
        super::attributes::trim_value(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discarded_combines() {
        let cat = TokenCategory::DISCARDED | TokenCategory::SECTION;
        assert!(cat.contains(TokenCategory::SECTION));
        assert_eq!(cat.base(), TokenCategory::SECTION);
        let token = Token::new(cat, "<![x", 3);
        assert!(token.is_discarded());
        assert!(!token.is_tag());
        assert_eq!(token.end(), 7);
    }

    #[test]
    fn test_is_empty() {
        assert!(Token::content("", 0).is_empty());
        assert!(Token::content(" \r\n\t", 0).is_empty());
        assert!(!Token::content(" x ", 0).is_empty());
        let discarded = Token::new(TokenCategory::DISCARDED | TokenCategory::CONTENT, " ", 0);
        assert!(!discarded.is_empty());
        assert!(!Token::new(TokenCategory::COMMENT, "", 0).is_empty());
    }

    #[test]
    fn test_sub_spans() {
        let token = Token::new(TokenCategory::OPENING_TAG, "<a x=\"1\">", 10)
            .with_name("a", 11)
            .with_data("x=\"1\"", 13);
        assert!(token.is_tag());
        assert_eq!(token.name, "a");
        assert_eq!(token.name_offset, Some(11));
        assert_eq!(token.data_offset, Some(13));
    }
}
