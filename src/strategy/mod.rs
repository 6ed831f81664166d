//! Batch strategies
//!
//! - parallel: Rayon-backed tokenization of many independent inputs

pub mod parallel;

pub use parallel::{batch_histogram, category_histogram, scan_batch, tokenize_batch};
