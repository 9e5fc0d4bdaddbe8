use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use cardex_core::{ExtractedRecord, Issuer, OwnerId, UploadOutcome};
use cardex_ocr::{digest_hex, OcrBackend, StatementPipeline};
use cardex_storage::{find_upload, insert_upload, DbPool, InsertError};

use crate::validate::{validate_batch, BatchLimits, IncomingFile, ValidationError};

/// Outcomes of one upload batch, grouped by status with input order
/// preserved within each group.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub processed: Vec<ProcessedFile>,
    pub skipped: Vec<String>,
    pub failed: Vec<FailedFile>,
}

#[derive(Debug, Serialize)]
pub struct ProcessedFile {
    pub filename: String,
    pub issuer: Issuer,
    pub data: ExtractedRecord,
}

#[derive(Debug, Serialize)]
pub struct FailedFile {
    pub filename: String,
    pub reason: String,
}

impl BatchSummary {
    pub fn push(&mut self, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Processed { filename, record } => self.processed.push(ProcessedFile {
                filename,
                issuer: record.issuer,
                data: record,
            }),
            UploadOutcome::Skipped { filename } => self.skipped.push(filename),
            UploadOutcome::Failed { filename, reason } => {
                self.failed.push(FailedFile { filename, reason })
            }
        }
    }

    pub fn is_all_processed(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Runs upload batches: validates up front, then takes each file through
/// fingerprint → dedup lookup → OCR/extraction → insert, sequentially and
/// independently.
pub struct BatchProcessor<R: OcrBackend> {
    pipeline: StatementPipeline<R>,
    pool: DbPool,
    limits: BatchLimits,
}

impl<R: OcrBackend + 'static> BatchProcessor<R> {
    pub fn new(pipeline: StatementPipeline<R>, pool: DbPool, limits: BatchLimits) -> Self {
        Self { pipeline, pool, limits }
    }

    /// Process a batch for one owner. Validation failures reject the whole
    /// batch; after that point every failure is isolated to its file.
    pub async fn run(
        &self,
        owner: OwnerId,
        files: Vec<IncomingFile>,
    ) -> Result<BatchSummary, ValidationError> {
        validate_batch(&files, &self.limits)?;

        let batch_id = Uuid::new_v4();
        let span =
            tracing::info_span!("upload_batch", batch = %batch_id, owner = %owner, files = files.len());
        async move {
            let mut summary = BatchSummary::default();
            for file in &files {
                let outcome = self.process_one(owner, file).await;
                match &outcome {
                    UploadOutcome::Processed { filename, record } => {
                        if record.is_empty() {
                            tracing::info!(file = %filename, "processed, no fields matched");
                        } else {
                            tracing::info!(file = %filename, issuer = %record.issuer, "processed");
                        }
                    }
                    UploadOutcome::Skipped { filename } => {
                        tracing::info!(file = %filename, "skipped duplicate");
                    }
                    UploadOutcome::Failed { filename, reason } => {
                        tracing::warn!(file = %filename, %reason, "failed");
                    }
                }
                summary.push(outcome);
            }
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    async fn process_one(&self, owner: OwnerId, file: &IncomingFile) -> UploadOutcome {
        let digest = digest_hex(&file.bytes);

        // Fast path: the owner already stored these exact bytes. No re-OCR,
        // no re-extraction, no write.
        match find_upload(&self.pool, owner, &digest).await {
            Ok(Some(_)) => return UploadOutcome::Skipped { filename: file.filename.clone() },
            Ok(None) => {}
            Err(e) => {
                return UploadOutcome::Failed {
                    filename: file.filename.clone(),
                    reason: e.to_string(),
                }
            }
        }

        let scan = match self.pipeline.process_bytes(&file.bytes).await {
            Ok(scan) => scan,
            Err(e) => {
                return UploadOutcome::Failed {
                    filename: file.filename.clone(),
                    reason: e.to_string(),
                }
            }
        };

        match insert_upload(&self.pool, owner, &digest, &file.filename, &scan.record).await {
            Ok(_) => UploadOutcome::Processed {
                filename: file.filename.clone(),
                record: scan.record,
            },
            // Lost a race against an identical concurrent upload; the
            // constraint is the arbiter and this file is simply a duplicate.
            Err(InsertError::DuplicateDigest) => {
                UploadOutcome::Skipped { filename: file.filename.clone() }
            }
            Err(e) => UploadOutcome::Failed {
                filename: file.filename.clone(),
                reason: e.to_string(),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
