//! Error types for Mail Triage.

/// Classifier training errors.
///
/// These can only surface at startup; the model is trained once and never
/// touched again, so request handlers never see them.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Failed to assemble feature matrix: {0}")]
    Features(String),

    #[error("Model training failed: {0}")]
    Training(String),
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("OpenAI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenAI returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response from OpenAI: {reason}")]
    InvalidResponse { reason: String },
}
