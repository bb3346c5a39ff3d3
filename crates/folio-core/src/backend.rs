use std::fmt::Display;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction strategies.
///
/// Implementors return the raw combined text of every page they could read.
/// Sanitization and the acceptance bar are applied by the caller
/// (`folio_pdf::StrategyChain`), so a backend should not filter its output.
pub trait PdfBackend: Send + Sync {
    /// Short name used in logs, e.g. `"layout"`.
    fn name(&self) -> &'static str;

    /// Extract the full text content of a PDF file.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}

/// Join per-page results with a blank line, skipping pages that failed.
///
/// Each failure is logged at `warn` with its zero-based page index so that
/// one broken page does not discard the rest of the document.
pub fn join_pages<E: Display>(
    backend: &str,
    pages: impl IntoIterator<Item = Result<String, E>>,
) -> String {
    let mut kept = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        match page {
            Ok(text) => kept.push(text),
            Err(e) => tracing::warn!(backend, page = index, error = %e, "skipping unreadable page"),
        }
    }
    kept.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_failures() {
        let pages: Vec<Result<String, String>> = vec![
            Ok("first".into()),
            Err("bad xref".into()),
            Ok("third".into()),
        ];
        assert_eq!(join_pages("test", pages), "first\n\nthird");
    }

    #[test]
    fn test_join_pages_all_failed_is_empty() {
        let pages: Vec<Result<String, String>> = vec![Err("a".into()), Err("b".into())];
        assert_eq!(join_pages("test", pages), "");
    }
}
