//! OpenAI chat-completion client.
//!
//! Plain reqwest against the chat completions endpoint, no SDK wrapper.
//! One attempt per call; retry policy belongs to the caller (there is none).

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::json;

use crate::config::OpenAiConfig;
use crate::error::LlmError;
use crate::reply::ChatCompletion;

/// Model used for reply generation.
const MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for replies.
const TEMPERATURE: f32 = 0.2;

/// Token cap for a generated reply.
const MAX_TOKENS: u32 = 200;

/// Chat-completion client for the OpenAI API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    fn model_name(&self) -> &str {
        MODEL
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.api_base);
        let body = json!({
            "model": MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let resp = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let resp_json: serde_json::Value = resp.json().await?;
        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::InvalidResponse {
                reason: "missing choices[0].message.content".to_string(),
            })?;

        Ok(content.to_string())
    }
}
