//! Email text normalization.
//!
//! One pipeline feeds both the classifier and the on-page preview:
//! lowercase → collapse whitespace → tokenize → keep alphabetic tokens →
//! drop stopwords → stem → re-join with single spaces. Deterministic for
//! any input.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

/// English stopwords (the standard NLTK list, alphabetic entries).
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
        "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "her", "hers", "herself", "it", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
        "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during",
        "before", "after", "above", "below", "to", "from", "up", "down",
        "in", "out", "on", "off", "over", "under", "again", "further",
        "then", "once", "here", "there", "when", "where", "why", "how",
        "all", "any", "both", "each", "few", "more", "most", "other",
        "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "s", "t", "can", "will", "just", "don",
        "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
        "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn",
        "ma", "mightn", "mustn", "needn", "shan", "shouldn", "wasn",
        "weren", "won", "wouldn",
    ]
    .iter()
    .copied()
    .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw email text into the token string the classifier was
/// trained on.
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let stemmer = Stemmer::create(Algorithm::English);

    collapsed
        .unicode_words()
        .filter(|w| w.chars().all(char::is_alphabetic))
        .filter(|w| !STOPWORDS.contains(*w))
        .map(|w| stemmer.stem(w).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
