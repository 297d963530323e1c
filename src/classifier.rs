//! Email category model: TF-IDF features into a logistic regression.
//!
//! Trained once at startup on the fixed corpus below. The fitted model is
//! immutable afterwards and safe to share across request handlers.

use linfa::Dataset;
use linfa::traits::{Fit, Predict};
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ClassifierError;
use crate::nlp::preprocess::preprocess;
use crate::nlp::tfidf::TfIdfVectorizer;

/// Vocabulary cap for the vectorizer.
const MAX_FEATURES: usize = 2000;

/// Solver iteration cap.
const MAX_ITERATIONS: u64 = 1000;

/// Labeled training corpus, fixed at compile time.
pub const TRAINING_SAMPLES: [(&str, Category); 8] = [
    (
        "Hi, can I get an update on ticket #123? The client is asking for ETA.",
        Category::Produtivo,
    ),
    (
        "Please share the contract and signed agreement for client ABC.",
        Category::Produtivo,
    ),
    (
        "Happy holidays and best wishes to the whole team!",
        Category::Improdutivo,
    ),
    (
        "Thanks for your help earlier, much appreciated.",
        Category::Improdutivo,
    ),
    (
        "There is a discrepancy in the latest statement, please investigate.",
        Category::Produtivo,
    ),
    (
        "Congratulations on the new year everyone!",
        Category::Improdutivo,
    ),
    (
        "Attached is the bank reconciliation file. Please confirm receipt.",
        Category::Produtivo,
    ),
    (
        "Just saying hello and hope you're well.",
        Category::Improdutivo,
    ),
];

/// Email category.
///
/// "Produtivo" needs action (requests, disputes, documents to confirm);
/// "Improdutivo" does not (greetings, thanks, season's wishes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Produtivo,
    Improdutivo,
}

impl Category {
    /// Portuguese label, exactly as rendered to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Produtivo => "Produtivo",
            Self::Improdutivo => "Improdutivo",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The trained classifier: vectorizer plus fitted model.
pub struct EmailClassifier {
    vectorizer: TfIdfVectorizer,
    model: FittedLogisticRegression<f64, &'static str>,
}

impl EmailClassifier {
    /// Train on the fixed corpus. Called once at startup.
    pub fn train() -> Result<Self, ClassifierError> {
        let documents: Vec<String> = TRAINING_SAMPLES
            .iter()
            .map(|(text, _)| preprocess(text))
            .collect();

        let mut vectorizer = TfIdfVectorizer::new(MAX_FEATURES);
        vectorizer.fit(&documents);

        let rows = documents.len();
        let cols = vectorizer.vocabulary_size();
        let mut flat = Vec::with_capacity(rows * cols);
        for doc in &documents {
            flat.extend(vectorizer.transform(doc));
        }
        let records = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| ClassifierError::Features(e.to_string()))?;
        let targets: Array1<&'static str> = TRAINING_SAMPLES
            .iter()
            .map(|(_, category)| category.label())
            .collect();

        let dataset = Dataset::new(records, targets);
        let model = LogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&dataset)
            .map_err(|e| ClassifierError::Training(e.to_string()))?;

        info!(samples = rows, features = cols, "Classifier trained");

        Ok(Self { vectorizer, model })
    }

    /// Classify preprocessed email text.
    ///
    /// Always returns one of the two labels; an empty or fully unknown input
    /// becomes an all-zero feature row and still gets a prediction.
    pub fn classify(&self, preprocessed: &str) -> Category {
        let row = Array1::from_vec(self.vectorizer.transform(preprocessed));
        let features = row.insert_axis(Axis(0));
        let predicted = self.model.predict(&features);

        // The model only knows the two labels it was trained with.
        if predicted[0] == Category::Produtivo.label() {
            Category::Produtivo
        } else {
            Category::Improdutivo
        }
    }

    /// Number of features in the fitted vocabulary.
    pub fn feature_count(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        assert_eq!(Category::Produtivo.label(), "Produtivo");
        assert_eq!(Category::Improdutivo.label(), "Improdutivo");
        assert_eq!(Category::Produtivo.to_string(), "Produtivo");
    }

    #[test]
    fn category_serialization() {
        let json = serde_json::to_value(Category::Improdutivo).unwrap();
        assert_eq!(json, "Improdutivo");
        let back: Category = serde_json::from_value(json).unwrap();
        assert_eq!(back, Category::Improdutivo);
    }

    #[test]
    fn train_builds_a_model() {
        let classifier = EmailClassifier::train().unwrap();
        assert!(classifier.feature_count() > 0);
        assert!(classifier.feature_count() <= MAX_FEATURES);
    }

    #[test]
    fn classifies_every_training_sample_correctly() {
        let classifier = EmailClassifier::train().unwrap();
        for (text, expected) in TRAINING_SAMPLES {
            let predicted = classifier.classify(&preprocess(text));
            assert_eq!(predicted, expected, "misclassified: {text}");
        }
    }

    #[test]
    fn classifies_congratulations_as_improdutivo() {
        let classifier = EmailClassifier::train().unwrap();
        let normalized = preprocess("Congratulations on the new year everyone!");
        assert_eq!(classifier.classify(&normalized), Category::Improdutivo);
    }

    #[test]
    fn classifies_contract_request_as_produtivo() {
        let classifier = EmailClassifier::train().unwrap();
        let normalized =
            preprocess("Please share the contract and signed agreement for client ABC.");
        assert_eq!(classifier.classify(&normalized), Category::Produtivo);
    }

    #[test]
    fn empty_input_still_gets_a_label() {
        let classifier = EmailClassifier::train().unwrap();
        let category = classifier.classify("");
        assert!(matches!(
            category,
            Category::Produtivo | Category::Improdutivo
        ));
    }

    #[test]
    fn unknown_vocabulary_still_gets_a_label() {
        let classifier = EmailClassifier::train().unwrap();
        let category = classifier.classify(preprocess("xyzzy plugh frobnicate").as_str());
        assert!(matches!(
            category,
            Category::Produtivo | Category::Improdutivo
        ));
    }
}
