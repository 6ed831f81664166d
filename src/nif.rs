//! Erlang NIF bindings
//!
//! Exposes the XML tokenizer to Elixir as `RustyScan.Native`. Inputs are
//! binaries; anything that is not valid UTF-8 yields
//! `{:error, :invalid_utf8}`.

use crate::core::token::Token;
use crate::reader::{AttributeReader, TokenReader};
use crate::strategy::parallel::tokenize_batch as tokenize_all;
use crate::term::{attributes_to_term, invalid_utf8_term, tokens_to_term};
use rustler::{Binary, Env, NifResult, Term};

// ============================================================================
// Tokenizer
// ============================================================================

/// Tokenize one document
#[rustler::nif]
fn tokenize<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    let Ok(text) = std::str::from_utf8(input.as_slice()) else {
        return Ok(invalid_utf8_term(env));
    };
    let tokens: Vec<Token> = TokenReader::new(text).collect();
    Ok(tokens_to_term(env, &tokens))
}

/// Split a tag's raw attribute text into `{name, value | nil}` pairs
#[rustler::nif]
fn attributes<'a>(env: Env<'a>, data: Binary<'a>) -> NifResult<Term<'a>> {
    let Ok(text) = std::str::from_utf8(data.as_slice()) else {
        return Ok(invalid_utf8_term(env));
    };
    let attrs: Vec<Token> = AttributeReader::new(text, 0).collect();
    Ok(attributes_to_term(env, &attrs))
}

// ============================================================================
// Batch
// ============================================================================

/// Tokenize many documents in parallel
#[rustler::nif(schedule = "DirtyCpu")]
fn tokenize_batch<'a>(env: Env<'a>, inputs: Vec<Binary<'a>>) -> NifResult<Term<'a>> {
    let texts: Result<Vec<&str>, _> = inputs
        .iter()
        .map(|input| std::str::from_utf8(input.as_slice()))
        .collect();
    let Ok(texts) = texts else {
        return Ok(invalid_utf8_term(env));
    };

    let mut list = Term::list_new_empty(env);
    for tokens in tokenize_all(&texts).iter().rev() {
        list = list.list_prepend(tokens_to_term(env, tokens));
    }
    Ok(list)
}

rustler::init!("Elixir.RustyScan.Native");
