//! Configuration types, built from environment variables.

use secrecy::SecretString;

/// Default listen port when `PORT` is unset or unparseable.
const DEFAULT_PORT: u16 = 5000;

/// Default OpenAI API base URL.
const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com/v1";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port (the server binds 0.0.0.0).
    pub port: u16,
    /// OpenAI access; `None` means replies come from the canned templates only.
    pub openai: Option<OpenAiConfig>,
}

impl AppConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            openai: OpenAiConfig::from_env(),
        }
    }
}

/// OpenAI API configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key, never logged.
    pub api_key: SecretString,
    /// API base, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
}

impl OpenAiConfig {
    /// Build config from environment variables.
    /// Returns `None` if neither `OPENAI_API_KEY` nor `OPENAI_KEY` is set
    /// (LLM reply generation disabled).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_KEY"))
            .ok()?;

        let api_base = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENAI_BASE.to_string());

        Some(Self {
            api_key: SecretString::from(api_key),
            api_base,
        })
    }
}
