use std::sync::Arc;

use mail_triage::classifier::{EmailClassifier, TRAINING_SAMPLES};
use mail_triage::config::AppConfig;
use mail_triage::pipeline::EmailPipeline;
use mail_triage::reply::openai::OpenAiClient;
use mail_triage::reply::{ChatCompletion, ReplyGenerator};
use mail_triage::web::app_routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();

    eprintln!("📬 Mail Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   UI: http://0.0.0.0:{}/", config.port);

    // ── Classifier ──────────────────────────────────────────────────────
    let classifier = Arc::new(EmailClassifier::train()?);
    eprintln!(
        "   Classifier: trained on {} samples ({} features)",
        TRAINING_SAMPLES.len(),
        classifier.feature_count()
    );

    // ── Reply generation ────────────────────────────────────────────────
    let replies = match config.openai {
        Some(openai_config) => {
            let client = OpenAiClient::new(openai_config);
            eprintln!("   Replies: templates + OpenAI ({})", client.model_name());
            ReplyGenerator::with_llm(Arc::new(client))
        }
        None => {
            eprintln!("   Replies: templates only (no OPENAI_API_KEY)");
            ReplyGenerator::templates_only()
        }
    };

    let pipeline = Arc::new(EmailPipeline::new(classifier, replies));
    let app = app_routes(pipeline);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "HTTP server started");
    axum::serve(listener, app).await?;

    Ok(())
}
