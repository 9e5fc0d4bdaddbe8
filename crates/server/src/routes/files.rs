use std::str::FromStr;

use axum::extract::{Multipart, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use cardex_core::{ExtractedRecord, Issuer, Period};
use cardex_ingest::{BatchSummary, IncomingFile};
use cardex_storage::{list_uploads, StoredUpload};

use crate::error::ApiError;
use crate::owner::Owner;
use crate::AppState;

/// Accepts a multipart batch under the `files` field and returns the
/// per-file outcomes.
pub async fn upload(
    State(state): State<AppState>,
    Owner(owner): Owner,
    mut multipart: Multipart,
) -> Result<Json<BatchSummary>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("files") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let media_type = field.content_type().unwrap_or("").to_string();
        let bytes = field.bytes().await?.to_vec();
        files.push(IncomingFile { filename, media_type, bytes });
    }
    if files.is_empty() {
        return Err(ApiError::EmptyUpload);
    }

    let summary = state.processor.run(owner, files).await?;
    Ok(Json(summary))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub issuer: Option<String>,
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub filename: String,
    pub issuer: Issuer,
    pub data: ExtractedRecord,
    pub uploaded_at: String,
}

impl From<StoredUpload> for HistoryItem {
    fn from(upload: StoredUpload) -> Self {
        Self {
            filename: upload.filename,
            issuer: upload.issuer,
            data: upload.record,
            uploaded_at: upload.uploaded_at,
        }
    }
}

/// Lists the caller's stored extractions, newest first, optionally narrowed
/// to an issuer and a trailing period.
pub async fn history(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryItem>>, ApiError> {
    let issuer = query
        .issuer
        .as_deref()
        .map(Issuer::from_str)
        .transpose()
        .map_err(|e| ApiError::BadQuery(e.to_string()))?;
    let since = query
        .period
        .as_deref()
        .map(Period::from_str)
        .transpose()
        .map_err(|e| ApiError::BadQuery(e.to_string()))?
        .map(|period| period.cutoff_from(Utc::now()));

    let uploads = list_uploads(&state.pool, owner, issuer, since).await?;
    Ok(Json(uploads.into_iter().map(HistoryItem::from).collect()))
}
