//! HTTP handlers for the triage UI.
//!
//! `POST /process` accepts the multipart form from the index page. A file
//! upload with a filename wins over pasted text; pasted text is trimmed
//! before the empty check, extracted file text is not.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;
use tracing::{debug, error};

use super::AppState;
use super::render::{self, PageView};
use crate::extract::extract_text;

/// Message shown when neither pasted text nor a readable file arrived.
const NO_TEXT_MESSAGE: &str = "Nenhum texto enviado";

/// Body of the sample email served by `GET /download_sample`.
const SAMPLE_EMAIL: &str = "Assunto: Solicitação de atualização\n\nOlá,\n\nGostaria de saber o status do protocolo 2024-567. Por favor, envie atualização.\n\nAtenciosamente,\nCliente";

/// Errors while reading the upload form.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid multipart form: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        error!(error = %self, "Failed to read upload form");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

/// `GET /` serves the form.
pub async fn index() -> Html<String> {
    Html(render::page(PageView::Form))
}

/// `GET /health` liveness check.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "mail-triage",
    }))
}

/// `GET /download_sample` serves a sample email as a download.
pub async fn download_sample() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sample_email.txt\"",
            ),
        ],
        SAMPLE_EMAIL,
    )
}

/// `POST /process` classifies the submitted email and renders the result.
pub async fn process(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, UploadError> {
    let mut pasted_text = String::new();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "email_text" => pasted_text = field.text().await?.trim().to_string(),
            "email_file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !filename.is_empty() {
                    upload = Some((filename, bytes.to_vec()));
                }
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let original_text = match &upload {
        Some((filename, bytes)) => extract_text(filename, bytes),
        None => pasted_text,
    };

    if original_text.is_empty() {
        debug!("Submission rejected: no usable text");
        return Ok(Html(render::page(PageView::Error(NO_TEXT_MESSAGE))));
    }

    let analysis = state.pipeline.process(&original_text).await;
    Ok(Html(render::page(PageView::Result(&analysis))))
}
