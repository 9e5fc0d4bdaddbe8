use serde::{Deserialize, Serialize};

use crate::record::ExtractedRecord;

/// Per-file result of an upload batch.
///
/// Only `Processed` corresponds to a durable stored record. `Skipped` marks
/// a content duplicate for the same owner, `Failed` an OCR or storage
/// failure isolated to that one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Processed {
        filename: String,
        record: ExtractedRecord,
    },
    Skipped {
        filename: String,
    },
    Failed {
        filename: String,
        reason: String,
    },
}

impl UploadOutcome {
    pub fn filename(&self) -> &str {
        match self {
            UploadOutcome::Processed { filename, .. }
            | UploadOutcome::Skipped { filename }
            | UploadOutcome::Failed { filename, .. } => filename,
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, UploadOutcome::Processed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issuer::Issuer;

    #[test]
    fn filename_covers_all_variants() {
        let p = UploadOutcome::Processed {
            filename: "a.pdf".to_string(),
            record: ExtractedRecord::with_issuer(Issuer::Hdfc),
        };
        let s = UploadOutcome::Skipped { filename: "b.pdf".to_string() };
        let f = UploadOutcome::Failed {
            filename: "c.pdf".to_string(),
            reason: "ocr".to_string(),
        };
        assert_eq!(p.filename(), "a.pdf");
        assert_eq!(s.filename(), "b.pdf");
        assert_eq!(f.filename(), "c.pdf");
        assert!(p.is_processed());
        assert!(!s.is_processed());
    }

    #[test]
    fn serializes_with_status_tag() {
        let s = UploadOutcome::Skipped { filename: "b.pdf".to_string() };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"status\":\"skipped\""));
    }
}
