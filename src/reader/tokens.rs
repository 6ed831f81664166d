//! Readers over the XML tokenizer
//!
//! Tokens borrow the input for `'a`; the reader only keeps a cursor.

use crate::core::attributes::next_attribute;
use crate::core::token::Token;
use crate::core::tokenizer::next_token;
use std::iter::FusedIterator;

/// Lazy sequence of element tokens
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    input: &'a str,
    base_offset: usize,
    cursor: usize,
}

impl<'a> TokenReader<'a> {
    /// Create a reader over a whole document
    pub fn new(input: &'a str) -> Self {
        Self::with_offset(input, 0)
    }

    /// Create a reader over a chunk that starts at `base_offset` in the
    /// original document
    pub fn with_offset(input: &'a str, base_offset: usize) -> Self {
        TokenReader {
            input,
            base_offset,
            cursor: 0,
        }
    }

    /// Position relative to the start of the chunk
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to `pos` (relative to the start of the chunk)
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end of the input or not on a `char`
    /// boundary. Both indicate a caller bug, not malformed markup.
    pub fn seek(&mut self, pos: usize) {
        assert!(
            pos <= self.input.len(),
            "seek position {pos} past end of input ({})",
            self.input.len()
        );
        assert!(
            self.input.is_char_boundary(pos),
            "seek position {pos} is not on a char boundary"
        );
        self.cursor = pos;
    }

    /// Restart from the beginning
    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = next_token(&self.input[self.cursor..], self.base_offset + self.cursor)?;
        self.cursor = token.end() - self.base_offset;
        Some(token)
    }
}

impl FusedIterator for TokenReader<'_> {}

/// Lazy sequence of the attributes in one tag
#[derive(Debug, Clone)]
pub struct AttributeReader<'a> {
    data: &'a str,
    base_offset: usize,
    cursor: usize,
}

impl<'a> AttributeReader<'a> {
    /// Create a reader over raw attribute text at absolute `offset`
    pub fn new(data: &'a str, offset: usize) -> Self {
        AttributeReader {
            data,
            base_offset: offset,
            cursor: 0,
        }
    }

    /// Create a reader over a tag token's data sub-span
    ///
    /// Tokens without data, and tokens that are not well-formed tags
    /// (comments, sections, discarded input), yield nothing.
    pub fn for_tag(token: &Token<'a>) -> Self {
        match token.data_offset {
            Some(offset) if token.is_tag() => Self::new(token.data, offset),
            _ => Self::new("", token.end()),
        }
    }

    /// Restart from the first attribute
    #[inline]
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'a> Iterator for AttributeReader<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let attr = next_attribute(&self.data[self.cursor..], self.base_offset + self.cursor)?;
        self.cursor = attr.end() - self.base_offset;
        Some(attr)
    }
}

impl FusedIterator for AttributeReader<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::TokenCategory;
    use proptest::prelude::*;

    #[test]
    fn test_reader_sequence() {
        let input = "<a x=\"1\"><b/></a>";
        let categories: Vec<_> = TokenReader::new(input).map(|t| t.category).collect();
        assert_eq!(
            categories,
            vec![
                TokenCategory::OPENING_TAG,
                TokenCategory::UNPAIRED_TAG,
                TokenCategory::CLOSING_TAG
            ]
        );
    }

    #[test]
    fn test_attributes_of_tag() {
        let input = "<a x=\"1\" y='two' z>";
        let tag = TokenReader::new(input).next().unwrap();
        let attrs: Vec<_> = AttributeReader::for_tag(&tag).collect();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].name, "x");
        assert_eq!(attrs[0].trimmed_value(), "1");
        assert_eq!(&input[attrs[1].offset..attrs[1].end()], "y='two'");
        assert_eq!(attrs[1].data_offset, Some(11));
        assert!(!attrs[2].has_value());
        assert_eq!(attrs[2].name_offset, Some(17));
    }

    #[test]
    fn test_tag_without_data() {
        let tag = TokenReader::new("<a>").next().unwrap();
        assert_eq!(AttributeReader::for_tag(&tag).count(), 0);
    }

    #[test]
    fn test_non_tags_have_no_attributes() {
        let tokens: Vec<_> = TokenReader::new("<![CDATA[a=1 b]]><!-- x=1 --><a b=1>").collect();
        assert_eq!(tokens[0].category, TokenCategory::SECTION);
        assert_eq!(AttributeReader::for_tag(&tokens[0]).count(), 0);
        assert_eq!(tokens[1].category, TokenCategory::COMMENT);
        assert_eq!(AttributeReader::for_tag(&tokens[1]).count(), 0);
        assert_eq!(AttributeReader::for_tag(&tokens[2]).count(), 1);
    }

    #[test]
    fn test_reset_restarts() {
        let mut reader = TokenReader::new("x<a>y");
        assert_eq!(reader.by_ref().count(), 3);
        assert!(reader.next().is_none());
        reader.reset();
        assert_eq!(reader.next().map(|t| t.span), Some("x"));

        let mut attrs = AttributeReader::new("a b", 0);
        assert_eq!(attrs.by_ref().count(), 2);
        attrs.reset();
        assert_eq!(attrs.count(), 2);
    }

    #[test]
    fn test_chunk_offsets() {
        let document = "<root><item/></root>";
        let chunk = &document[6..];
        let tokens: Vec<_> = TokenReader::with_offset(chunk, 6).collect();
        assert_eq!(tokens[0].offset, 6);
        assert_eq!(&document[tokens[0].offset..tokens[0].end()], "<item/>");
        assert_eq!(tokens[1].offset, 13);
    }

    #[test]
    fn test_seek() {
        let mut reader = TokenReader::new("ab<c>");
        reader.seek(2);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.next().map(|t| t.name), Some("c"));
    }

    #[test]
    #[should_panic(expected = "past end of input")]
    fn test_seek_past_end_panics() {
        TokenReader::new("ab").seek(3);
    }

    #[test]
    #[should_panic(expected = "char boundary")]
    fn test_seek_inside_char_panics() {
        TokenReader::new("é").seek(1);
    }

    proptest! {
        #[test]
        fn prop_spans_reconstruct_input(input in "[<>/!?\\-\\[\\]=\"' a-c1é]{0,64}") {
            let rebuilt: String = TokenReader::new(&input).map(|t| t.span).collect();
            prop_assert_eq!(rebuilt, input);
        }

        #[test]
        fn prop_offsets_within_bounds(input in "[<>/!?\\-\\[\\]=\"' a-c1é]{0,64}") {
            let mut expected = 0;
            for token in TokenReader::new(&input) {
                prop_assert_eq!(token.offset, expected);
                prop_assert!(!token.span.is_empty());
                prop_assert!(token.end() <= input.len());
                for sub in [token.name_offset, token.data_offset].into_iter().flatten() {
                    prop_assert!(sub >= token.offset && sub <= token.end());
                }
                expected = token.end();
            }
        }

        #[test]
        fn prop_attributes_stay_inside_data(data in "[= \"'a-c]{0,32}") {
            let mut expected_min = 7;
            for attr in AttributeReader::new(&data, 7) {
                prop_assert!(attr.offset >= expected_min);
                prop_assert!(attr.end() <= 7 + data.len());
                expected_min = attr.end();
            }
        }
    }
}
