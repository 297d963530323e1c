//! Text normalization and feature extraction.

pub mod preprocess;
pub mod tfidf;
