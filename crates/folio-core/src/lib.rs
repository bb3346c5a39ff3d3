use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod config_file;
pub mod history;
pub mod record;
pub mod text_utils;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, join_pages};
pub use history::{
    HistoryRecord, HistoryStore, HistorySummary, InMemoryHistoryStore, SqliteHistoryStore,
    StoreError,
};
pub use record::{
    About, CertificationEntry, EducationEntry, ExperienceEntry, Links, Personal, PortfolioRecord,
    ProjectEntry, Skill,
};
pub use text_utils::sanitize;

/// An uploaded document as received from the caller.
///
/// Immutable once constructed. The bytes are written to scoped temporary
/// storage by the loader and dropped after extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl RawDocument {
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    /// Build a document from a standard base64 payload.
    pub fn from_base64(
        payload: &str,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, base64::DecodeError> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Self::new(bytes, file_name, content_type))
    }

    /// Lower-cased file extension without the dot, or `""` when absent.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

/// Which strategy produced an [`ExtractedText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Layout-aware PDF extraction (MuPDF structured text).
    Layout,
    /// Per-page extraction through the PDF object model (lopdf).
    Structural,
    /// Regex scan of decompressed content streams.
    RawStream,
    Docx,
    PlainText,
}

impl ExtractionMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Structural => "structural",
            Self::RawStream => "raw_stream",
            Self::Docx => "docx",
            Self::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plausibility measurements for a piece of extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Length in characters, not bytes.
    pub length: usize,
    pub readable_ratio: f64,
    pub vocabulary_hits: usize,
    pub artifact_count: usize,
}

/// Sanitized text produced by exactly one extraction strategy.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
    pub metrics: TextMetrics,
}

impl ExtractedText {
    /// Wrap already-sanitized text. Metrics are filled in by the quality gate.
    pub fn new(text: String, method: ExtractionMethod) -> Self {
        Self {
            text,
            method,
            metrics: TextMetrics::default(),
        }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercased() {
        let doc = RawDocument::new(Vec::new(), "Resume.PDF", "application/pdf");
        assert_eq!(doc.extension(), "pdf");
        let doc = RawDocument::new(Vec::new(), "resume", "text/plain");
        assert_eq!(doc.extension(), "");
    }

    #[test]
    fn test_from_base64() {
        let doc = RawDocument::from_base64("aGVsbG8=", "a.txt", "text/plain").unwrap();
        assert_eq!(doc.bytes, b"hello");
        assert!(RawDocument::from_base64("not base64!", "a.txt", "text/plain").is_err());
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(ExtractionMethod::RawStream.to_string(), "raw_stream");
        assert_eq!(
            serde_json::to_string(&ExtractionMethod::PlainText).unwrap(),
            "\"plain_text\""
        );
    }
}
