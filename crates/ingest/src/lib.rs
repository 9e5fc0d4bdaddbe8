pub mod batch;
pub mod validate;

pub use batch::{BatchProcessor, BatchSummary, FailedFile, ProcessedFile};
pub use validate::{
    validate_batch, BatchLimits, IncomingFile, ValidationError, ACCEPTED_MEDIA_TYPE,
    DEFAULT_MAX_FILE_BYTES,
};
