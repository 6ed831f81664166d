//! Elixir Term Conversion Utilities
//!
//! Converts tokens to Elixir terms. Lists are built back to front with
//! `list_prepend` so no intermediate `Vec<Term>` is allocated.

use crate::core::token::{Token, TokenCategory};
use rustler::{Encoder, Env, NewBinary, Term};

rustler::atoms! {
    error,
    invalid_utf8,
    discarded,
    content,
    opening_tag,
    closing_tag,
    unpaired_tag,
    comment,
    section,
    declaration,
    instruction,
    attribute,
}

/// Convert a category set to a list of atoms, lowest bit first
pub fn category_to_term<'a>(env: Env<'a>, category: TokenCategory) -> Term<'a> {
    let table = [
        (TokenCategory::DISCARDED, discarded()),
        (TokenCategory::CONTENT, content()),
        (TokenCategory::OPENING_TAG, opening_tag()),
        (TokenCategory::CLOSING_TAG, closing_tag()),
        (TokenCategory::UNPAIRED_TAG, unpaired_tag()),
        (TokenCategory::COMMENT, comment()),
        (TokenCategory::SECTION, section()),
        (TokenCategory::DECLARATION, declaration()),
        (TokenCategory::INSTRUCTION, instruction()),
        (TokenCategory::ATTRIBUTE, attribute()),
    ];

    let mut list = Term::list_new_empty(env);
    for (flag, atom) in table.iter().rev() {
        if category.contains(*flag) {
            list = list.list_prepend(atom.encode(env));
        }
    }
    list
}

/// `{categories, offset, len, name, data}`; absent name or data is `nil`
pub fn token_to_term<'a>(env: Env<'a>, token: &Token<'_>) -> Term<'a> {
    let name = optional_binary(env, token.name, token.name_offset);
    let data = optional_binary(env, token.data, token.data_offset);
    (
        category_to_term(env, token.category),
        token.offset,
        token.span.len(),
        name,
        data,
    )
        .encode(env)
}

pub fn tokens_to_term<'a>(env: Env<'a>, tokens: &[Token<'_>]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for token in tokens.iter().rev() {
        list = list.list_prepend(token_to_term(env, token));
    }
    list
}

/// `{name, value}` with quotes stripped, or `{name, nil}` for a flag
pub fn attributes_to_term<'a>(env: Env<'a>, attrs: &[Token<'_>]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for attr in attrs.iter().rev() {
        let value = if attr.has_value() {
            str_to_binary(env, attr.trimmed_value())
        } else {
            rustler::types::atom::nil().encode(env)
        };
        list = list.list_prepend((str_to_binary(env, attr.name), value).encode(env));
    }
    list
}

/// `{:error, :invalid_utf8}`
pub fn invalid_utf8_term(env: Env<'_>) -> Term<'_> {
    (error(), invalid_utf8()).encode(env)
}

fn optional_binary<'a>(env: Env<'a>, text: &str, offset: Option<usize>) -> Term<'a> {
    match offset {
        Some(_) => str_to_binary(env, text),
        None => rustler::types::atom::nil().encode(env),
    }
}

/// Copy a string slice into a fresh binary
#[inline]
fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
