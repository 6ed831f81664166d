//! Core tokenizing primitives
//!
//! - Scanner: memchr-backed delimiter and quote-aware searches
//! - Token: borrowed token model and category flags
//! - Tokenizer: XML element tokenizer with error recovery
//! - Attributes: attribute tokenizer and value trimming
//! - Unicode: XML name character classes

pub mod attributes;
pub mod scanner;
pub mod token;
pub mod tokenizer;
pub mod unicode;
