use std::path::Path;

use thiserror::Error;

use folio_core::text_utils::decode_utf8_lossy_drop;
use folio_core::{ExtractedText, ExtractionMethod, RawDocument, sanitize};
use folio_parsing::{ParsingConfig, quality};
use folio_pdf::{ChainThresholds, StrategyChain};

pub mod docx;
pub mod handler;
pub mod pipeline;
pub mod request;

// Re-export domain types for convenience
pub use folio_core::{PortfolioRecord, TextMetrics};
pub use handler::ResumeHandler;
pub use pipeline::{Pipeline, PipelineOutput};
pub use request::{HandlerResponse, ResumeRequest};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("could not extract readable text from {file_name}: {reason}")]
    UnreadableDocument { file_name: String, reason: String },
    #[error("invalid file content: {0}")]
    InvalidPayload(String),
    #[error("invalid parsing configuration: {0}")]
    Config(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The PDF strategy chain for this build: layout first when the `pdf`
/// feature is enabled, otherwise only the structural and raw-stream fallbacks.
pub fn default_chain(thresholds: ChainThresholds) -> StrategyChain {
    #[cfg(feature = "pdf")]
    {
        StrategyChain::standard(Box::new(folio_pdf_mupdf::MupdfBackend::new()), thresholds)
    }
    #[cfg(not(feature = "pdf"))]
    {
        StrategyChain::fallbacks_only(thresholds)
    }
}

/// Extract sanitized text from an uploaded document and run the quality gate.
///
/// The bytes are written to a temporary directory that is removed when this
/// function returns, whatever the outcome. Dispatches on the file extension:
/// - `.pdf` → the strategy chain
/// - `.docx` / `.doc` → the DOCX extractor
/// - anything else → lossy UTF-8 decode
pub fn load_text(
    doc: &RawDocument,
    chain: &StrategyChain,
    config: &ParsingConfig,
) -> Result<ExtractedText, IngestError> {
    load_text_in(doc, chain, config, &std::env::temp_dir())
}

/// [`load_text`] with the scratch directory created under `scratch_root`.
pub fn load_text_in(
    doc: &RawDocument,
    chain: &StrategyChain,
    config: &ParsingConfig,
    scratch_root: &Path,
) -> Result<ExtractedText, IngestError> {
    let dir = tempfile::tempdir_in(scratch_root)?;
    let path = dir.path().join(scratch_name(&doc.file_name));
    std::fs::write(&path, &doc.bytes)?;

    let unreadable = |reason: String| IngestError::UnreadableDocument {
        file_name: doc.file_name.clone(),
        reason,
    };

    let mut extracted = match doc.extension().as_str() {
        "pdf" => chain
            .extract(&path)
            .ok_or_else(|| unreadable("no PDF strategy produced enough text".into()))?,
        "docx" | "doc" => match docx::extract_docx_text(&path) {
            Ok(text) => ExtractedText::new(text, ExtractionMethod::Docx),
            Err(e) => {
                tracing::warn!(file = %doc.file_name, error = %e, "DOCX extraction failed");
                return Err(unreadable(e.to_string()));
            }
        },
        _ => ExtractedText::new(
            sanitize(&decode_utf8_lossy_drop(&doc.bytes)),
            ExtractionMethod::PlainText,
        ),
    };

    extracted.metrics = quality::measure_with_config(&extracted.text, config);
    if let Err(reason) = quality::check_with_config(&extracted.text, config) {
        tracing::info!(file = %doc.file_name, method = %extracted.method, %reason, "extracted text rejected");
        return Err(unreadable(reason.to_string()));
    }

    tracing::debug!(
        file = %doc.file_name,
        method = %extracted.method,
        chars = extracted.metrics.length,
        "text extracted"
    );
    Ok(extracted)
}

/// Last path component of the caller's file name, so uploads cannot escape
/// the scratch directory.
fn scratch_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload")
        .to_string()
}
