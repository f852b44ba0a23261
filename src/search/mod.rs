//! Full-text search infrastructure for the product catalog.
//!
//! This module provides the TF-IDF recall index, tokenization, and the
//! field-weighted relevance re-ranking applied after filtering.

mod index;
mod scoring;
mod tokenize;

pub use index::InvertedIndex;
pub use scoring::relevance_score;
pub use tokenize::{category_token, tokenize};
