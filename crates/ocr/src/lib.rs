pub mod classify;
pub mod extract;
pub mod hash;
pub mod normalize;
pub mod pipeline;
pub mod recognizer;

pub use classify::classify;
pub use extract::Extractor;
pub use hash::{digest_hex, sha256_bytes, to_hex};
pub use pipeline::{PipelineError, StatementPipeline, StatementScan, DEFAULT_OCR_TIMEOUT};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, OcrmypdfBackend};

/// Compiles a pattern once, on first use.
macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static regex::Regex {
            static R: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            R.get_or_init(|| regex::Regex::new($pat).expect("invalid regex"))
        }
    };
}

pub(crate) use re;
