//! XML Tokenizer - one-token-at-a-time markup classification
//!
//! [`next_token`] extracts exactly one token from the front of a slice:
//! - Content runs
//! - Opening, closing and unpaired (self-closing) tags
//! - Comments `<!--...-->`
//! - Sections `<![NAME[...]]>`
//! - Declarations `<!...>`
//! - Processing instructions `<?...?>`
//!
//! Malformed markup never fails. It is emitted with the `DISCARDED` flag,
//! and recovery resumes at the next `<` so a single bad tag cannot swallow
//! the rest of the document.

use super::scanner::{find_byte, find_literal, index_of_outside_quotes, trim_separators, QUOTES, WHITESPACE};
use super::token::{Token, TokenCategory};
use super::unicode::is_valid_name;

const OPENER: u8 = b'<';
const CLOSER: u8 = b'>';
const TERMINATOR: u8 = b'/';
const DECLARATION_MARK: u8 = b'!';
const INSTRUCTION_MARK: u8 = b'?';
const COMMENT_OPENER: &str = "<!--";
const COMMENT_CLOSER: &str = "-->";
const SECTION_OPENER: &str = "<![";
const SECTION_CLOSER: &str = "]]>";
const SECTION_DATA_OPENER: u8 = b'[';

/// Extract the next token from `input`
///
/// `offset` is the absolute position of `input[0]` in the original
/// document; every offset in the returned token is absolute as well.
/// Returns `None` once `input` is exhausted.
pub fn next_token(input: &str, offset: usize) -> Option<Token<'_>> {
    if input.is_empty() {
        return None;
    }

    let bytes = input.as_bytes();
    match find_byte(bytes, OPENER) {
        None => return Some(Token::content(input, offset)),
        Some(0) => {}
        // Tag scanning resumes from the opener on the next call
        Some(pos) => return Some(Token::content(&input[..pos], offset)),
    }

    if input.starts_with(COMMENT_OPENER) {
        return Some(scan_comment(input, offset));
    }
    if input.starts_with(SECTION_OPENER) {
        return Some(scan_section(input, offset));
    }

    // Find the closer, ignoring any '>' inside a quoted attribute value
    let close = match index_of_outside_quotes(&bytes[1..], CLOSER, QUOTES) {
        Some(i) => i + 1,
        None => {
            tracing::trace!(offset, "unterminated tag, discarding remainder");
            return Some(Token::new(
                TokenCategory::DISCARDED | TokenCategory::CONTENT,
                input,
                offset,
            ));
        }
    };

    Some(scan_tag(input, offset, close))
}

/// Comment starting at `input[0]`
fn scan_comment(input: &str, offset: usize) -> Token<'_> {
    let inner_start = COMMENT_OPENER.len();
    match find_literal(&input.as_bytes()[inner_start..], COMMENT_CLOSER.as_bytes()) {
        Some(i) => {
            let end = inner_start + i + COMMENT_CLOSER.len();
            Token::new(TokenCategory::COMMENT, &input[..end], offset)
                .with_data(&input[inner_start..inner_start + i], offset + inner_start)
        }
        None => {
            tracing::trace!(offset, "unterminated comment, discarding to end of input");
            Token::new(TokenCategory::DISCARDED | TokenCategory::COMMENT, input, offset)
        }
    }
}

/// Section starting at `input[0]`
fn scan_section(input: &str, offset: usize) -> Token<'_> {
    let bytes = input.as_bytes();
    let inner_start = SECTION_OPENER.len();

    let close = match find_literal(&bytes[inner_start..], SECTION_CLOSER.as_bytes()) {
        Some(i) => inner_start + i,
        None => {
            tracing::trace!(offset, "unterminated section");
            return recover(input, offset, TokenCategory::SECTION);
        }
    };
    let span = &input[..close + SECTION_CLOSER.len()];

    // Name runs from the section opener to the data opener
    match find_byte(&bytes[inner_start..close], SECTION_DATA_OPENER) {
        Some(i) => {
            let name_end = inner_start + i;
            let data_start = name_end + 1;
            Token::new(TokenCategory::SECTION, span, offset)
                .with_name(&input[inner_start..name_end], offset + inner_start)
                .with_data(&input[data_start..close], offset + data_start)
        }
        None => {
            tracing::trace!(offset, "section without data opener");
            Token::new(TokenCategory::DISCARDED | TokenCategory::SECTION, span, offset)
        }
    }
}

/// Tag whose closer sits at `input[close]`
fn scan_tag(input: &str, offset: usize, close: usize) -> Token<'_> {
    let body = &input[1..close];
    let body_bytes = body.as_bytes();

    // (category, prefix chars inside the body, suffix chars inside the body)
    let (category, prefix, suffix) = match body_bytes.first() {
        Some(&DECLARATION_MARK) => (TokenCategory::DECLARATION, 1, 0),
        Some(&INSTRUCTION_MARK) if body_bytes.len() >= 2 && body_bytes.ends_with(&[INSTRUCTION_MARK]) => {
            (TokenCategory::INSTRUCTION, 1, 1)
        }
        Some(&TERMINATOR) => (TokenCategory::CLOSING_TAG, 1, 0),
        _ if body_bytes.ends_with(&[TERMINATOR]) => (TokenCategory::UNPAIRED_TAG, 0, 1),
        _ => (TokenCategory::OPENING_TAG, 0, 0),
    };

    let inner = &body[prefix..body.len() - suffix];
    let name_len = inner
        .bytes()
        .position(|b| WHITESPACE.contains(&b))
        .unwrap_or(inner.len());
    let name = &inner[..name_len];

    if !is_valid_name(name) {
        tracing::trace!(offset, name, "invalid tag name");
        return recover(input, offset, category);
    }

    // '<' plus the category prefix
    let name_start = 1 + prefix;
    let token = Token::new(category, &input[..close + 1], offset)
        .with_name(name, offset + name_start);

    if category == TokenCategory::CLOSING_TAG {
        return token;
    }

    let (data, leading) = trim_separators(&inner[name_len..], WHITESPACE);
    if data.is_empty() {
        token
    } else {
        token.with_data(data, offset + name_start + name_len + leading)
    }
}

/// Discard up to the next opener, or to end of input if there is none
fn recover(input: &str, offset: usize, tentative: TokenCategory) -> Token<'_> {
    let end = find_byte(&input.as_bytes()[1..], OPENER).map_or(input.len(), |i| i + 1);
    Token::new(TokenCategory::DISCARDED | tentative, &input[..end], offset)
}
