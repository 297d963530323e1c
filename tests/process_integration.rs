//! Integration tests for the email triage HTTP surface.
//!
//! Each test spins up an Axum server on a random port and exercises the
//! real form-submission contract through a reqwest client.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;

use mail_triage::classifier::EmailClassifier;
use mail_triage::pipeline::EmailPipeline;
use mail_triage::reply::ReplyGenerator;
use mail_triage::web::app_routes;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One-page PDF with no content stream, standing in for a scanned document
/// from which no text can be recovered.
const TEXTLESS_PDF: &[u8] = b"%PDF-1.4\n\
    1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n\
    2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n\
    3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\nendobj\n\
    xref\n0 4\n\
    0000000000 65535 f \n\
    0000000009 00000 n \n\
    0000000058 00000 n \n\
    0000000115 00000 n \n\
    trailer\n<< /Size 4 /Root 1 0 R >>\nstartxref\n186\n%%EOF\n";

/// Start an Axum server on a random port, template-only replies.
async fn start_server() -> u16 {
    let classifier = Arc::new(EmailClassifier::train().expect("classifier training failed"));
    let pipeline = Arc::new(EmailPipeline::new(
        classifier,
        ReplyGenerator::templates_only(),
    ));
    let app = app_routes(pipeline);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}

// ── Static Pages ─────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_the_form() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Classificador de Emails"));
        assert!(body.contains(r#"<textarea name="email_text""#));
        assert!(body.contains(r#"name="email_file""#));
        assert!(body.contains(r#"action="/process""#));
        assert!(body.contains("Baixar amostra"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn health_endpoint() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "mail-triage");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn download_sample_serves_attachment() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/download_sample"))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("attachment"));
        assert!(disposition.contains("sample_email.txt"));

        let body = resp.text().await.unwrap();
        assert!(body.starts_with("Assunto: Solicitação de atualização"));
        assert!(body.contains("protocolo 2024-567"));
    })
    .await
    .expect("test timed out");
}

// ── Form Processing ──────────────────────────────────────────────────

#[tokio::test]
async fn pasted_productive_email_is_classified() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let form = reqwest::multipart::Form::new().text(
            "email_text",
            "Please share the contract and signed agreement for client ABC.",
        );
        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Resultado"));
        assert!(body.contains("badge bg-success result-badge"));
        assert!(body.contains("Produtivo"));
        assert!(body.contains("analisando sua solicitação"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn pasted_unproductive_email_is_classified() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let form = reqwest::multipart::Form::new()
            .text("email_text", "Congratulations on the new year everyone!");
        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("badge bg-secondary result-badge"));
        assert!(body.contains("Improdutivo"));
        assert!(body.contains("não requer ação imediata"));
        // Preview shows the normalized text.
        assert!(body.contains("congratul new year everyon"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn empty_submission_shows_error() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let form = reqwest::multipart::Form::new().text("email_text", "   ");
        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Nenhum texto enviado"));
        assert!(!body.contains("Resultado"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn txt_upload_wins_over_pasted_text() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        // Pasted text alone would classify as Improdutivo; the upload must win.
        let file = reqwest::multipart::Part::bytes(
            b"Please share the contract and signed agreement for client ABC.".to_vec(),
        )
        .file_name("email.txt");
        let form = reqwest::multipart::Form::new()
            .text("email_text", "Congratulations on the new year everyone!")
            .part("email_file", file);

        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Produtivo"));
        assert!(body.contains("badge bg-success result-badge"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn file_part_without_filename_is_ignored() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        // Browsers send an empty file part when no file is chosen.
        let file = reqwest::multipart::Part::bytes(Vec::new());
        let form = reqwest::multipart::Form::new()
            .text(
                "email_text",
                "There is a discrepancy in the latest statement, please investigate.",
            )
            .part("email_file", file);

        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Produtivo"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreadable_pdf_is_treated_as_no_text() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let file = reqwest::multipart::Part::bytes(b"not really a pdf".to_vec())
            .file_name("email.pdf");
        let form = reqwest::multipart::Form::new()
            .text("email_text", "")
            .part("email_file", file);

        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Nenhum texto enviado"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn textless_pdf_still_renders_a_result() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let file =
            reqwest::multipart::Part::bytes(TEXTLESS_PDF.to_vec()).file_name("scan.pdf");
        let form = reqwest::multipart::Form::new()
            .text("email_text", "")
            .part("email_file", file);

        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        // A PDF that parses counts as a submission even with nothing recovered.
        let body = resp.text().await.unwrap();
        assert!(body.contains("Resultado"));
        assert!(body.contains("Resposta sugerida"));
        assert!(!body.contains("Nenhum texto enviado"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn upload_with_unknown_extension_is_read_as_text() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server().await;

        let file = reqwest::multipart::Part::bytes(
            b"Hi, can I get an update on ticket #123? The client is asking for ETA.".to_vec(),
        )
        .file_name("email.eml");
        let form = reqwest::multipart::Form::new().part("email_file", file);

        let resp = reqwest::Client::new()
            .post(format!("http://127.0.0.1:{port}/process"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let body = resp.text().await.unwrap();
        assert!(body.contains("Produtivo"));
    })
    .await
    .expect("test timed out");
}
