use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use folio_core::{BackendError, PdfBackend, join_pages};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (AGPL-3.0) so that builds
/// without the `pdf` feature of `folio-ingest` do not link it.
///
/// Text is read block by block and line by line, which keeps multi-column
/// resumes in reading order. Each page is first read with strict flags; a
/// page that yields nothing is read again preserving whitespace.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

fn page_text(page: &Page, flags: TextPageFlags) -> Result<String, mupdf::Error> {
    let text_page = page.to_text_page(flags)?;
    let mut text = String::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            let line_text: String = line
                .chars()
                .map(|c| c.char().unwrap_or('\u{FFFD}'))
                .collect();
            text.push_str(&line_text);
            text.push('\n');
        }
    }
    Ok(text)
}

impl PdfBackend for MupdfBackend {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let pages = document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
            .map(|page_result| -> Result<String, mupdf::Error> {
                let page = page_result?;
                match page_text(&page, TextPageFlags::empty()) {
                    Ok(text) if !text.trim().is_empty() => Ok(text),
                    _ => page_text(&page, TextPageFlags::PRESERVE_WHITESPACE),
                }
            });
        Ok(join_pages(self.name(), pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_open_error() {
        let err = MupdfBackend::new()
            .extract_text(Path::new("/nonexistent/resume.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
        assert_eq!(MupdfBackend::new().name(), "layout");
    }
}
