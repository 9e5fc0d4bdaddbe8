use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use cardex_ingest::DEFAULT_MAX_FILE_BYTES;
use cardex_ocr::DEFAULT_OCR_TIMEOUT;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Which OCR engine backs the pipeline. `Mock` produces no text and exists
/// for local runs without an ocrmypdf install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrSelection {
    Ocrmypdf,
    Mock,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
    pub max_file_bytes: usize,
    pub ocr: OcrSelection,
    pub ocr_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("cardex.db"),
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            ocr: OcrSelection::Ocrmypdf,
            ocr_timeout: DEFAULT_OCR_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from `CARDEX_*` environment variables. Absent
    /// variables fall back to defaults; present but malformed ones error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("CARDEX_DB") {
            config.db_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("CARDEX_BIND") {
            config.bind = v
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "CARDEX_BIND", value: v })?;
        }
        if let Ok(v) = std::env::var("CARDEX_MAX_FILE_BYTES") {
            config.max_file_bytes = v
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "CARDEX_MAX_FILE_BYTES", value: v })?;
        }
        if let Ok(v) = std::env::var("CARDEX_OCR") {
            config.ocr = match v.as_str() {
                "ocrmypdf" => OcrSelection::Ocrmypdf,
                "mock" => OcrSelection::Mock,
                _ => return Err(ConfigError::Invalid { name: "CARDEX_OCR", value: v }),
            };
        }
        if let Ok(v) = std::env::var("CARDEX_OCR_TIMEOUT_SECS") {
            let secs: u64 = v
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "CARDEX_OCR_TIMEOUT_SECS", value: v })?;
            config.ocr_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
