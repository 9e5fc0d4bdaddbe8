use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use cardex_ingest::ValidationError;

/// Request-level failures, mapped onto HTTP statuses. Per-file processing
/// failures never surface here; they land in the batch summary instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("missing x-owner-id header")]
    MissingOwner,
    #[error("x-owner-id must be a positive integer")]
    InvalidOwner,
    #[error("no files in upload")]
    EmptyUpload,
    #[error("{0}")]
    BadQuery(String),
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
    #[error("database error")]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_)
            | ApiError::EmptyUpload
            | ApiError::BadQuery(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingOwner | ApiError::InvalidOwner => StatusCode::UNAUTHORIZED,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
