//! Server-rendered HTML for the single-page UI.
//!
//! No template engine: the page is a single Bootstrap card assembled from
//! string fragments, with user-controlled content HTML-escaped.

use crate::classifier::Category;
use crate::pipeline::Analysis;

/// What the page shows below the paste-or-upload form.
pub enum PageView<'a> {
    /// Just the form.
    Form,
    /// The form plus a classification result.
    Result(&'a Analysis),
    /// The form plus a warning alert.
    Error(&'a str),
}

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="pt-br">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Email Classifier — Demo</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>
      body { background: linear-gradient(120deg,#f8fafc,#eef2ff); }
      .card { box-shadow: 0 6px 18px rgba(15,23,42,0.08); border-radius:12px }
      textarea { min-height:160px }
      .result-badge { font-weight:600 }
    </style>
  </head>
  <body>
    <div class="container py-5">
      <div class="row justify-content-center">
        <div class="col-md-9">
          <div class="card p-4">
            <h3 class="mb-1">Classificador de Emails — Demo</h3>
            <p class="text-muted">Cole o texto do email ou envie um arquivo (.txt ou .pdf). O sistema irá classificar e sugerir uma resposta automática.</p>

            <form id="emailForm" method="post" action="/process" enctype="multipart/form-data">
              <div class="mb-3">
                <label class="form-label">Colar texto do email</label>
                <textarea name="email_text" class="form-control" placeholder="Cole aqui o corpo do email..."></textarea>
              </div>
              <div class="mb-3">
                <label class="form-label">Ou faça upload do arquivo</label>
                <input class="form-control" type="file" name="email_file" accept=".txt,.pdf">
              </div>
              <div class="d-flex gap-2">
                <button class="btn btn-primary" type="submit">Processar</button>
                <button class="btn btn-outline-secondary" type="button" onclick="fillExamples()">Exemplo</button>
                <a class="btn btn-link text-muted" href="/download_sample">Baixar amostra</a>
              </div>
            </form>
"#;

const PAGE_FOOT: &str = r#"
          </div>
          <div class="text-center mt-3 small text-muted">Feito para desafio — adaptável para produção.</div>
        </div>
      </div>
    </div>

    <script>
      function fillExamples(){
        const area = document.querySelector('textarea[name=email_text]');
        area.value = "Olá, gostaria de saber o status do protocolo 2024-567. Já faz 10 dias e não tivemos atualização.\nAtenciosamente, Cliente";
      }
    </script>
  </body>
</html>
"#;

/// Render the full page for the given view.
pub fn page(view: PageView<'_>) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + PAGE_FOOT.len() + 1024);
    html.push_str(PAGE_HEAD);
    match view {
        PageView::Form => {}
        PageView::Result(analysis) => html.push_str(&result_fragment(analysis)),
        PageView::Error(message) => html.push_str(&error_fragment(message)),
    }
    html.push_str(PAGE_FOOT);
    html
}

fn result_fragment(analysis: &Analysis) -> String {
    let badge = match analysis.category {
        Category::Produtivo => "success",
        Category::Improdutivo => "secondary",
    };
    format!(
        r#"            <hr>
            <h5>Resultado</h5>
            <p>Categoria: <span class="badge bg-{badge} result-badge">{category}</span></p>
            <h6>Resposta sugerida</h6>
            <div class="border rounded p-3 bg-white">
              <pre style="white-space:pre-wrap;">{reply}</pre>
            </div>
            <h6 class="mt-3">Trecho do email (pré-processado)</h6>
            <div class="small text-muted">{preview}</div>
"#,
        category = analysis.category.label(),
        reply = escape_html(&analysis.reply.text),
        preview = escape_html(&analysis.preview),
    )
}

fn error_fragment(message: &str) -> String {
    format!(
        r#"            <hr>
            <div class="alert alert-warning mb-0" role="alert">{}</div>
"#,
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
