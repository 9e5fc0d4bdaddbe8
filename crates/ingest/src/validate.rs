use thiserror::Error;

/// The only media type the pipeline accepts.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// Per-file size cap, 5 MiB inclusive.
pub const DEFAULT_MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// One file of an upload batch, as received from the boundary.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    /// Declared media type, e.g. `application/pdf`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchLimits {
    pub max_file_bytes: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self { max_file_bytes: DEFAULT_MAX_FILE_BYTES }
    }
}

/// A violation rejects the whole batch before any file is processed. The
/// message names the offending file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{filename}: unsupported media type {media_type:?}, only application/pdf is accepted")]
    UnsupportedMediaType { filename: String, media_type: String },
    #[error("{filename}: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { filename: String, size: usize, limit: usize },
}

/// Check every file's declared media type and size up front, failing on the
/// first violation. Nothing is processed for a batch that fails here.
pub fn validate_batch(files: &[IncomingFile], limits: &BatchLimits) -> Result<(), ValidationError> {
    for file in files {
        let media = file.media_type.split(';').next().unwrap_or("").trim();
        if !media.eq_ignore_ascii_case(ACCEPTED_MEDIA_TYPE) {
            return Err(ValidationError::UnsupportedMediaType {
                filename: file.filename.clone(),
                media_type: file.media_type.clone(),
            });
        }
        if file.bytes.len() > limits.max_file_bytes {
            return Err(ValidationError::TooLarge {
                filename: file.filename.clone(),
                size: file.bytes.len(),
                limit: limits.max_file_bytes,
            });
        }
    }
    Ok(())
}
