//! Web UI: form page, processing endpoint, sample download.

pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::pipeline::EmailPipeline;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<EmailPipeline>,
}

/// Build the router for the triage UI.
pub fn app_routes(pipeline: Arc<EmailPipeline>) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/", get(routes::index))
        .route("/process", post(routes::process))
        .route("/download_sample", get(routes::download_sample))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
