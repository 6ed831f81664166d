//! Markup name character classes
//!
//! Predicates for the name-start / name-char grammar used to validate tag
//! names in the XML tokenizer, plus the lighter ASCII identifier check the
//! generic syntax-driven scanner relies on.
//!
//! Only the Basic Multilingual Plane is recognised: characters above
//! U+FFFF never form part of a name.

/// Check if a character is markup whitespace (space, tab, LF, CR)
///
/// Deliberately narrower than `char::is_whitespace`.
#[inline]
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Byte flavour of [`is_whitespace`]
#[inline]
pub fn is_whitespace_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if a character may start a name
#[inline]
pub fn is_start_ncname_char(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphabetic() || ch == '_' || ch == ':';
    }
    is_unicode_name_start(ch)
}

/// Check if a character may continue a name
#[inline]
pub fn is_ncname_char(ch: char) -> bool {
    if ch.is_ascii() {
        return ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | ':' | '_');
    }
    is_unicode_name_start(ch)
        || ch == '\u{00B7}'
        || ('\u{0300}'..='\u{036F}').contains(&ch)
        || ('\u{203F}'..='\u{2040}').contains(&ch)
}

/// Non-ASCII NameStartChar ranges
#[inline]
fn is_unicode_name_start(ch: char) -> bool {
    matches!(ch,
        '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}')
}

/// Validate a full name: one start char followed by name chars
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_start_ncname_char(first) => chars.all(is_ncname_char),
        _ => false,
    }
}

/// ASCII-only identifier check used by the generic scanner
///
/// First byte is an ASCII letter or one of `alt_openers`; the rest are
/// letters, digits, `-`, `_` or `:`.
pub fn is_ascii_identifier(name: &str, alt_openers: &[u8]) -> bool {
    let bytes = name.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => {
            (first.is_ascii_alphabetic() || alt_openers.contains(&first))
                && rest
                    .iter()
                    .all(|&b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':'))
        }
        None => false,
    }
}
