//! TF-IDF feature extraction over unigrams and bigrams.

use std::collections::{HashMap, HashSet};

/// TF-IDF vectorizer over whitespace tokens of preprocessed text.
///
/// Weighting is raw term count times smoothed IDF
/// (`ln((1 + n) / (1 + df)) + 1`), with L2-normalized rows. The vocabulary
/// covers unigrams and bigrams of tokens at least two characters long,
/// capped at `max_features` by corpus frequency. Terms outside the fitted
/// vocabulary are ignored at transform time.
pub struct TfIdfVectorizer {
    /// Term -> column index mapping (alphabetical order, for determinism).
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Number of documents seen during fit.
    n_documents: usize,
    /// Vocabulary size cap.
    max_features: usize,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("max_features", &self.max_features)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer with the given feature cap.
    pub fn new(max_features: usize) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            max_features,
        }
    }

    /// Fit the vocabulary and IDF weights on the training documents.
    pub fn fit(&mut self, documents: &[String]) {
        self.n_documents = documents.len();

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut corpus_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = ngrams(doc);
            for term in &terms {
                *corpus_frequency.entry(term.clone()).or_insert(0) += 1;
            }
            let unique: HashSet<&String> = terms.iter().collect();
            for term in unique {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // Keep the most frequent terms when over the cap, ties broken
        // alphabetically, then index the survivors in alphabetical order so
        // column positions are reproducible.
        let mut terms: Vec<(String, usize)> = corpus_frequency.into_iter().collect();
        if terms.len() > self.max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            terms.truncate(self.max_features);
        }
        let mut selected: Vec<String> = terms.into_iter().map(|(term, _)| term).collect();
        selected.sort();

        let mut vocabulary = HashMap::with_capacity(selected.len());
        let mut idf = vec![0.0; selected.len()];
        for (idx, term) in selected.into_iter().enumerate() {
            let df = document_frequency.get(&term).copied().unwrap_or(0);
            idf[idx] =
                ((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;
    }

    /// Transform a document into an L2-normalized TF-IDF row.
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut row = vec![0.0; self.vocabulary.len()];

        for term in ngrams(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                row[idx] += 1.0;
            }
        }

        for (idx, weight) in row.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in &mut row {
                *weight /= norm;
            }
        }

        row
    }

    /// Number of fitted features.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it survived fitting.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

/// Unigrams and bigrams over whitespace tokens of length >= 2.
fn ngrams(document: &str) -> Vec<String> {
    let tokens: Vec<&str> = document
        .split_whitespace()
        .filter(|w| w.len() > 1)
        .collect();

    let mut terms = Vec::with_capacity(tokens.len().saturating_mul(2));
    terms.extend(tokens.iter().map(|t| (*t).to_string()));
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}
