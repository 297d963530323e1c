//! Suggested-reply generation: canned templates with an optional LLM upgrade.
//!
//! Without an API key the mapping is pure (category → template). With one,
//! a single chat-completion attempt is made; any failure falls back to the
//! template with a note appended. No retries, no queuing.

pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::classifier::Category;
use crate::error::LlmError;

/// Canned reply for actionable email.
pub const PRODUCTIVE_TEMPLATE: &str = "Olá, obrigado pelo contato. Recebemos sua mensagem e estamos analisando sua solicitação. Por favor, informe qualquer informação adicional relevante (números de pedido, anexos ou prazos).";

/// Canned reply for email needing no action.
pub const UNPRODUCTIVE_TEMPLATE: &str = "Olá! Agradecemos sua mensagem. Ela não requer ação imediata, mas ficamos à disposição caso precise de algo.";

/// Appended to the template when LLM generation was attempted and failed.
const FALLBACK_NOTE: &str =
    "\n\n(Note: generation via OpenAI failed; returned template used.)";

/// Where a suggested reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// LLM completion succeeded.
    Generated,
    /// No LLM configured; canned template.
    Template,
    /// LLM attempt failed; canned template plus note.
    Fallback,
}

impl ReplySource {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Template => "template",
            Self::Fallback => "fallback",
        }
    }
}

/// A reply suggestion for a classified email.
#[derive(Debug, Clone)]
pub struct SuggestedReply {
    pub text: String,
    pub source: ReplySource,
}

/// Minimal chat-completion seam so tests can substitute a mock.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Model identifier for logging.
    fn model_name(&self) -> &str;

    /// One-shot completion for a prompt.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Generates reply suggestions for classified email.
pub struct ReplyGenerator {
    llm: Option<Arc<dyn ChatCompletion>>,
}

impl ReplyGenerator {
    /// Template-only generator (no API key configured).
    pub fn templates_only() -> Self {
        Self { llm: None }
    }

    /// Generator that tries the given LLM before falling back.
    pub fn with_llm(llm: Arc<dyn ChatCompletion>) -> Self {
        Self { llm: Some(llm) }
    }

    /// Canned reply for a category.
    pub fn template_for(category: Category) -> &'static str {
        match category {
            Category::Produtivo => PRODUCTIVE_TEMPLATE,
            Category::Improdutivo => UNPRODUCTIVE_TEMPLATE,
        }
    }

    /// Suggest a reply for an email with the given classification.
    pub async fn suggest(&self, category: Category, original_text: &str) -> SuggestedReply {
        let template = Self::template_for(category);

        let Some(llm) = &self.llm else {
            return SuggestedReply {
                text: template.to_string(),
                source: ReplySource::Template,
            };
        };

        let prompt = build_reply_prompt(category, original_text);
        match llm.complete(&prompt).await {
            Ok(generated) => {
                info!(
                    model = llm.model_name(),
                    category = category.label(),
                    "Generated reply via LLM"
                );
                SuggestedReply {
                    text: generated.trim().to_string(),
                    source: ReplySource::Generated,
                }
            }
            Err(e) => {
                warn!(error = %e, "LLM reply generation failed, using template");
                SuggestedReply {
                    text: format!("{template}{FALLBACK_NOTE}"),
                    source: ReplySource::Fallback,
                }
            }
        }
    }
}

/// Build the reply-generation prompt.
fn build_reply_prompt(category: Category, original_text: &str) -> String {
    format!(
        "You are an assistant for a financial services company. The incoming email is:\n\n\
         {}\n\n\
         The email was classified as {}. Write a polite, professional reply in Portuguese, \
         2-4 sentences, including a brief next step if relevant.",
        original_text,
        category.label()
    )
}
