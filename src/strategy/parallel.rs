//! Parallel batch tokenization
//!
//! Uses Rayon to tokenize many independent inputs at once. Each input is
//! still tokenized sequentially; only the batch is split across threads.

use crate::core::token::{Token, TokenCategory};
use crate::reader::{TagReader, TokenReader};
use crate::syntax::{MarkupSyntax, TagSpan};
use rayon::prelude::*;
use std::collections::HashMap;

/// Tokenize multiple XML inputs in parallel
///
/// Results are in input order; offsets are relative to each input.
pub fn tokenize_batch<'a>(inputs: &[&'a str]) -> Vec<Vec<Token<'a>>> {
    tracing::debug!(inputs = inputs.len(), "tokenizing batch");
    inputs
        .par_iter()
        .map(|&input| TokenReader::new(input).collect::<Vec<_>>())
        .collect()
}

/// Scan multiple inputs with one dialect in parallel
pub fn scan_batch<'a>(syntax: &MarkupSyntax, inputs: &[&'a str]) -> Vec<Vec<TagSpan<'a>>> {
    tracing::debug!(inputs = inputs.len(), "scanning batch");
    inputs
        .par_iter()
        .map(|&input| TagReader::new(syntax, input).collect::<Vec<_>>())
        .collect()
}

/// Count tokens per category in one input
///
/// Discarded tokens are counted under their full category, e.g.
/// `DISCARDED | COMMENT`, not under `COMMENT`.
pub fn category_histogram(input: &str) -> HashMap<TokenCategory, usize> {
    let mut counts = HashMap::new();
    for token in TokenReader::new(input) {
        *counts.entry(token.category).or_insert(0) += 1;
    }
    counts
}

/// Category counts summed over a batch
pub fn batch_histogram(inputs: &[&str]) -> HashMap<TokenCategory, usize> {
    tracing::debug!(inputs = inputs.len(), "building batch histogram");
    inputs
        .par_iter()
        .map(|&input| category_histogram(input))
        .reduce(HashMap::new, |mut acc, counts| {
            for (category, n) in counts {
                *acc.entry(category).or_insert(0) += n;
            }
            acc
        })
}
