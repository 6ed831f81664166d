//! Lazy token readers
//!
//! Cursor-driven iterators over the tokenizers:
//! - TokenReader / AttributeReader: XML tokenizer and attribute tokenizer
//! - TagReader / AttributeSpanReader: generic syntax-driven scanner
//!
//! Every reader is finite (each step consumes at least one byte), never
//! blocks, and can be restarted with `reset`.

pub mod spans;
pub mod tokens;

pub use spans::{AttributeSpanReader, TagReader};
pub use tokens::{AttributeReader, TokenReader};
