use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use cardex_core::ExtractedRecord;

use crate::classify;
use crate::extract::Extractor;
use crate::normalize;
use crate::recognizer::{OcrBackend, OcrError};

/// OCR of a large scanned statement can take minutes; anything past this is
/// treated as a failure for that file.
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),
}

/// The result of running one document through OCR and extraction.
#[derive(Debug)]
pub struct StatementScan {
    /// Normalized full-document text the rules ran against.
    pub ocr_text: String,
    /// Structured fields mined from the text.
    pub record: ExtractedRecord,
}

/// Orchestrates, per document: scratch dir → OCR under timeout → normalize →
/// classify issuer → extract fields.
pub struct StatementPipeline<R: OcrBackend> {
    recognizer: Arc<R>,
    ocr_timeout: Duration,
}

impl<R: OcrBackend + 'static> StatementPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer: Arc::new(recognizer), ocr_timeout: DEFAULT_OCR_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.ocr_timeout = timeout;
        self
    }

    /// Process one uploaded document. The scratch directory holding the
    /// materialized PDF and any OCR intermediates is removed on every exit
    /// path; a run abandoned by the timeout removes it when the backend
    /// call finally returns.
    pub async fn process_bytes(&self, data: &[u8]) -> Result<StatementScan, PipelineError> {
        let workdir = tempfile::tempdir()?;
        let pdf_path = workdir.path().join("input.pdf");
        tokio::fs::write(&pdf_path, data).await?;

        // The backend blocks, so it runs on the blocking pool with a hard
        // deadline. A timed-out run keeps going in the background with its
        // result discarded; the scratch dir rides with the task so it is
        // never removed under a backend that is still writing to it.
        let recognizer = Arc::clone(&self.recognizer);
        let ocr = tokio::task::spawn_blocking(move || {
            let pages = recognizer.recognize(&pdf_path);
            drop(workdir);
            pages
        });
        let pages = match tokio::time::timeout(self.ocr_timeout, ocr).await {
            Ok(joined) => {
                joined.map_err(|e| OcrError::Engine(format!("OCR task aborted: {e}")))??
            }
            Err(_) => return Err(PipelineError::Timeout(self.ocr_timeout.as_secs())),
        };

        let text = normalize::join_pages(&pages);
        let issuer = classify::classify(&text);
        let record = Extractor::extract(&text, issuer);

        Ok(StatementScan { ocr_text: text, record })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
