//! Runtime markup dialects
//!
//! A [`MarkupSyntax`] describes the punctuation of one markup dialect. The
//! generic scanner in [`scanner`] and [`attributes`] is driven entirely by
//! it, so dialects whose bracket, quote, comment or section conventions
//! differ from XML need a new descriptor rather than new code.
//!
//! Descriptors are immutable once built and are `Send + Sync`; the shared
//! presets [`XML`] and [`HTML`] are initialised once on first use.

pub mod attributes;
pub mod helpers;
pub mod scanner;
pub mod span;

use once_cell::sync::Lazy;
use thiserror::Error;

pub use span::{AttributeKind, AttributeSpan, TagKind, TagSpan};

/// Shared XML dialect
pub static XML: Lazy<MarkupSyntax> = Lazy::new(MarkupSyntax::xml);

/// Shared HTML dialect
pub static HTML: Lazy<MarkupSyntax> = Lazy::new(MarkupSyntax::html);

/// Error building a [`MarkupSyntax`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("{name} must be an ASCII character, got {found:?}")]
    NonAscii { name: &'static str, found: char },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{name} {literal:?} must start with the opener {opener:?}")]
    OpenerMismatch {
        name: &'static str,
        literal: String,
        opener: char,
    },

    #[error("{name} {literal:?} must end with the closer {closer:?}")]
    CloserMismatch {
        name: &'static str,
        literal: String,
        closer: char,
    },

    #[error("{name} {literal:?} must be longer than the opener {opener:?}")]
    BareOpener {
        name: &'static str,
        literal: String,
        opener: char,
    },

    #[error("opener and closer must differ (both {0:?})")]
    SameOpenerAndCloser(char),
}

/// Punctuation of one markup dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSyntax {
    opener: u8,
    closer: u8,
    terminator: u8,
    equals: u8,
    alt_openers: Vec<u8>,
    separators: Vec<u8>,
    attribute_separators: Vec<u8>,
    quotes: Vec<u8>,
    comment_opener: String,
    comment_closer: String,
    section_opener: String,
    section_closer: String,
    section_data_opener: u8,
}

impl MarkupSyntax {
    /// XML: `<a/>`, `<!--c-->`, `<![CDATA[d]]>`, `<!DOCTYPE>`, `<?pi?>`
    pub fn xml() -> Self {
        MarkupSyntax {
            opener: b'<',
            closer: b'>',
            terminator: b'/',
            equals: b'=',
            alt_openers: b"!?".to_vec(),
            separators: b" \t\n\r".to_vec(),
            attribute_separators: b" \t\n\r".to_vec(),
            quotes: b"\"'".to_vec(),
            comment_opener: "<!--".to_owned(),
            comment_closer: "-->".to_owned(),
            section_opener: "<![".to_owned(),
            section_closer: "]]>".to_owned(),
            section_data_opener: b'[',
        }
    }

    /// HTML: no processing instructions, form feed separates attributes
    pub fn html() -> Self {
        MarkupSyntax {
            alt_openers: b"!".to_vec(),
            separators: b" \t\n\r\x0C".to_vec(),
            attribute_separators: b" \t\n\r\x0C".to_vec(),
            ..Self::xml()
        }
    }

    /// Start from the XML punctuation and override what differs
    pub fn builder() -> MarkupSyntaxBuilder {
        MarkupSyntaxBuilder::default()
    }

    #[inline]
    pub fn opener(&self) -> u8 {
        self.opener
    }

    #[inline]
    pub fn closer(&self) -> u8 {
        self.closer
    }

    /// Closing / self-closing marker
    #[inline]
    pub fn terminator(&self) -> u8 {
        self.terminator
    }

    #[inline]
    pub fn equals(&self) -> u8 {
        self.equals
    }

    /// Markers allowed in place of the first letter of a tag name
    #[inline]
    pub fn alt_openers(&self) -> &[u8] {
        &self.alt_openers
    }

    #[inline]
    pub fn separators(&self) -> &[u8] {
        &self.separators
    }

    #[inline]
    pub fn attribute_separators(&self) -> &[u8] {
        &self.attribute_separators
    }

    #[inline]
    pub fn quotes(&self) -> &[u8] {
        &self.quotes
    }

    #[inline]
    pub fn comment_opener(&self) -> &str {
        &self.comment_opener
    }

    #[inline]
    pub fn comment_closer(&self) -> &str {
        &self.comment_closer
    }

    #[inline]
    pub fn section_opener(&self) -> &str {
        &self.section_opener
    }

    #[inline]
    pub fn section_closer(&self) -> &str {
        &self.section_closer
    }

    /// Separates a section's name from its data: the second `[` of `<![CDATA[`
    #[inline]
    pub fn section_data_opener(&self) -> u8 {
        self.section_data_opener
    }
}

impl Default for MarkupSyntax {
    fn default() -> Self {
        Self::xml()
    }
}

/// Builder for [`MarkupSyntax`], validated on [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct MarkupSyntaxBuilder {
    opener: char,
    closer: char,
    terminator: char,
    equals: char,
    alt_openers: String,
    separators: String,
    attribute_separators: String,
    quotes: String,
    comment_opener: String,
    comment_closer: String,
    section_opener: String,
    section_closer: String,
    section_data_opener: char,
}

impl Default for MarkupSyntaxBuilder {
    fn default() -> Self {
        MarkupSyntaxBuilder {
            opener: '<',
            closer: '>',
            terminator: '/',
            equals: '=',
            alt_openers: "!?".to_owned(),
            separators: " \t\n\r".to_owned(),
            attribute_separators: " \t\n\r".to_owned(),
            quotes: "\"'".to_owned(),
            comment_opener: "<!--".to_owned(),
            comment_closer: "-->".to_owned(),
            section_opener: "<![".to_owned(),
            section_closer: "]]>".to_owned(),
            section_data_opener: '[',
        }
    }
}

impl MarkupSyntaxBuilder {
    /// Character that starts every tag
    pub fn opener(mut self, ch: char) -> Self {
        self.opener = ch;
        self
    }

    /// Character that ends every tag
    pub fn closer(mut self, ch: char) -> Self {
        self.closer = ch;
        self
    }

    /// Closing / self-closing marker
    pub fn terminator(mut self, ch: char) -> Self {
        self.terminator = ch;
        self
    }

    /// Separator between an attribute name and its value
    pub fn equals(mut self, ch: char) -> Self {
        self.equals = ch;
        self
    }

    /// Markers allowed in place of the first letter of a tag name; may be empty
    pub fn alt_openers(mut self, chars: &str) -> Self {
        self.alt_openers = chars.to_owned();
        self
    }

    /// Characters ending a tag name
    pub fn separators(mut self, chars: &str) -> Self {
        self.separators = chars.to_owned();
        self
    }

    /// Characters between attributes
    pub fn attribute_separators(mut self, chars: &str) -> Self {
        self.attribute_separators = chars.to_owned();
        self
    }

    /// Quotation marks protecting closers and separators in values
    pub fn quotes(mut self, chars: &str) -> Self {
        self.quotes = chars.to_owned();
        self
    }

    /// Comment delimiters, e.g. `<!--` and `-->`
    pub fn comment(mut self, opener: &str, closer: &str) -> Self {
        self.comment_opener = opener.to_owned();
        self.comment_closer = closer.to_owned();
        self
    }

    /// Section delimiters: `<![`, the `[` before the data, and `]]>`
    pub fn section(mut self, opener: &str, data_opener: char, closer: &str) -> Self {
        self.section_opener = opener.to_owned();
        self.section_data_opener = data_opener;
        self.section_closer = closer.to_owned();
        self
    }

    /// Validate and freeze the descriptor
    pub fn build(self) -> Result<MarkupSyntax, SyntaxError> {
        let opener = ascii("opener", self.opener)?;
        let closer = ascii("closer", self.closer)?;
        if opener == closer {
            return Err(SyntaxError::SameOpenerAndCloser(self.opener));
        }

        let separators = ascii_set("separators", &self.separators)?;
        let attribute_separators = ascii_set("attribute separators", &self.attribute_separators)?;
        let quotes = ascii_set("quotes", &self.quotes)?;
        // Alt openers are optional
        let alt_openers = self
            .alt_openers
            .chars()
            .map(|ch| ascii("alt opener", ch))
            .collect::<Result<Vec<_>, _>>()?;

        check_opening_literal("comment opener", &self.comment_opener, self.opener)?;
        check_closing_literal("comment closer", &self.comment_closer, self.closer)?;
        check_opening_literal("section opener", &self.section_opener, self.opener)?;
        check_closing_literal("section closer", &self.section_closer, self.closer)?;

        Ok(MarkupSyntax {
            opener,
            closer,
            terminator: ascii("terminator", self.terminator)?,
            equals: ascii("equals", self.equals)?,
            alt_openers,
            separators,
            attribute_separators,
            quotes,
            comment_opener: self.comment_opener,
            comment_closer: self.comment_closer,
            section_opener: self.section_opener,
            section_closer: self.section_closer,
            section_data_opener: ascii("section data opener", self.section_data_opener)?,
        })
    }
}

fn ascii(name: &'static str, ch: char) -> Result<u8, SyntaxError> {
    if ch.is_ascii() {
        Ok(ch as u8)
    } else {
        Err(SyntaxError::NonAscii { name, found: ch })
    }
}

fn ascii_set(name: &'static str, chars: &str) -> Result<Vec<u8>, SyntaxError> {
    if chars.is_empty() {
        return Err(SyntaxError::Empty(name));
    }
    chars.chars().map(|ch| ascii(name, ch)).collect()
}

fn check_opening_literal(name: &'static str, literal: &str, opener: char) -> Result<(), SyntaxError> {
    if literal.is_empty() {
        return Err(SyntaxError::Empty(name));
    }
    if !literal.starts_with(opener) {
        return Err(SyntaxError::OpenerMismatch {
            name,
            literal: literal.to_owned(),
            opener,
        });
    }
    // Literal must not be the opener alone
    if literal.len() == opener.len_utf8() {
        return Err(SyntaxError::BareOpener {
            name,
            literal: literal.to_owned(),
            opener,
        });
    }
    Ok(())
}

fn check_closing_literal(name: &'static str, literal: &str, closer: char) -> Result<(), SyntaxError> {
    if literal.is_empty() {
        return Err(SyntaxError::Empty(name));
    }
    if !literal.ends_with(closer) {
        return Err(SyntaxError::CloserMismatch {
            name,
            literal: literal.to_owned(),
            closer,
        });
    }
    Ok(())
}
