pub mod config;
pub mod error;
pub mod owner;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use cardex_ingest::BatchProcessor;
use cardex_ocr::OcrBackend;
use cardex_storage::DbPool;

/// Hard cap on the whole request body. Per-file size limits are enforced
/// downstream during batch validation.
pub const REQUEST_BODY_CAP: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub processor: Arc<BatchProcessor<Arc<dyn OcrBackend>>>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/files/upload", post(routes::files::upload))
        .route("/api/files/history", get(routes::files::history))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(REQUEST_BODY_CAP))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
