//! Request pipeline: preprocess, classify, suggest a reply.
//!
//! Flow:
//! 1. Preprocess the raw text (also yields the on-page preview)
//! 2. Classifier → category
//! 3. Reply generator → template or LLM reply

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::classifier::{Category, EmailClassifier};
use crate::nlp::preprocess::preprocess;
use crate::reply::{ReplyGenerator, SuggestedReply};

/// Preview length in characters.
const PREVIEW_MAX_CHARS: usize = 800;

/// Result of running one email through the pipeline.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Predicted category.
    pub category: Category,
    /// Suggested reply, generated or canned.
    pub reply: SuggestedReply,
    /// Leading slice of the preprocessed text, for display.
    pub preview: String,
    /// When processing completed.
    pub processed_at: DateTime<Utc>,
}

/// End-to-end email pipeline. Built once at startup, stateless per request.
pub struct EmailPipeline {
    classifier: Arc<EmailClassifier>,
    replies: ReplyGenerator,
}

impl EmailPipeline {
    pub fn new(classifier: Arc<EmailClassifier>, replies: ReplyGenerator) -> Self {
        Self { classifier, replies }
    }

    /// Run one email through preprocess → classify → reply.
    pub async fn process(&self, original_text: &str) -> Analysis {
        let normalized = preprocess(original_text);
        let preview: String = normalized.chars().take(PREVIEW_MAX_CHARS).collect();
        let category = self.classifier.classify(&normalized);

        let reply = self.replies.suggest(category, original_text).await;

        info!(
            category = category.label(),
            reply_source = reply.source.label(),
            input_chars = original_text.chars().count(),
            "Processed email"
        );

        Analysis {
            category,
            reply,
            preview,
            processed_at: Utc::now(),
        }
    }
}
