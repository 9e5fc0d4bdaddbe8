use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR engine error: {0}")]
    Engine(String),
}

/// Abstraction over an OCR backend.
/// Implementations accept a PDF on disk and return the recognized text,
/// one string per page. Calls block; run them on the blocking pool.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, pdf_path: &Path) -> Result<Vec<String>, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Arc<T> {
    fn recognize(&self, pdf_path: &Path) -> Result<Vec<String>, OcrError> {
        (**self).recognize(pdf_path)
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns pre-set page text, useful for exercising the extraction pipeline
/// without ocrmypdf installed.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    pub pages: Vec<String>,
}

impl MockRecognizer {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    pub fn single(text: impl Into<String>) -> Self {
        Self { pages: vec![text.into()] }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _pdf_path: &Path) -> Result<Vec<String>, OcrError> {
        Ok(self.pages.clone())
    }
}

// ── ocrmypdf backend ───────────────────────────────────────────────────────────

/// Shells out to the `ocrmypdf` binary in force-OCR mode and reads the page
/// text from its sidecar file. The sidecar and the OCR'd output PDF are
/// written next to the input, so callers placing the input in a scratch
/// directory get all intermediates cleaned up together.
#[derive(Debug, Clone)]
pub struct OcrmypdfBackend {
    binary: PathBuf,
    language: String,
}

impl OcrmypdfBackend {
    pub fn new() -> Self {
        Self { binary: PathBuf::from("ocrmypdf"), language: "eng".to_string() }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for OcrmypdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for OcrmypdfBackend {
    fn recognize(&self, pdf_path: &Path) -> Result<Vec<String>, OcrError> {
        let sidecar = pdf_path.with_extension("sidecar.txt");
        let ocr_pdf = pdf_path.with_extension("ocr.pdf");

        let output = Command::new(&self.binary)
            .arg("--force-ocr")
            .arg("--sidecar")
            .arg(&sidecar)
            .arg("-l")
            .arg(&self.language)
            .arg(pdf_path)
            .arg(&ocr_pdf)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Engine(format!(
                "ocrmypdf exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // The sidecar separates pages with form feeds.
        let text = std::fs::read_to_string(&sidecar)?;
        Ok(text.split('\u{c}').map(str::to_string).collect())
    }
}
