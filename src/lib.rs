//! RustyScan - Fault-tolerant markup tokenizer
//!
//! Splits XML-like text into classified, borrowed tokens without ever
//! failing on malformed input; anything unrecognisable comes back as a
//! `DISCARDED` token so the spans always tile the input.
//!
//! Engines:
//! - core: XML fast path (tokenizer, attribute tokenizer, name rules)
//! - syntax: generic scanner driven by a runtime [`MarkupSyntax`]
//! - reader: lazy iterators over both engines
//! - strategy: Rayon batch tokenization
//!
//! With the `nif` feature the crate also builds as an Erlang NIF library
//! (`RustyScan.Native`).

pub mod core;
pub mod reader;
pub mod strategy;
pub mod syntax;

#[cfg(feature = "nif")]
mod nif;
#[cfg(feature = "nif")]
mod term;

pub use crate::core::token::{Token, TokenCategory};
pub use reader::{AttributeReader, AttributeSpanReader, TagReader, TokenReader};
pub use syntax::{MarkupSyntax, MarkupSyntaxBuilder, SyntaxError};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Entry Points
// ============================================================================

/// Lazily tokenize an XML document
///
/// ```
/// use rustyscan::{tokenize, TokenCategory};
///
/// let categories: Vec<_> = tokenize("<a>hi</a>").map(|t| t.category).collect();
/// assert_eq!(categories[1], TokenCategory::CONTENT);
/// ```
#[inline]
pub fn tokenize(input: &str) -> TokenReader<'_> {
    TokenReader::new(input)
}

/// Lazily split a tag's attribute text, `offset` being its absolute position
#[inline]
pub fn attributes(data: &str, offset: usize) -> AttributeReader<'_> {
    AttributeReader::new(data, offset)
}

/// Lazily scan `input` with a runtime dialect
#[inline]
pub fn scan<'s, 'a>(syntax: &'s MarkupSyntax, input: &'a str) -> TagReader<'s, 'a> {
    TagReader::new(syntax, input)
}
