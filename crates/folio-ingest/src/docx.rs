use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use folio_core::sanitize;
use folio_core::text_utils::decode_utf8_lossy_drop;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("failed to open DOCX: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Body text of a Word document, sanitized.
///
/// Reads `word/document.xml` from the archive, ends a line at each paragraph
/// close, and replaces every other tag with a space.
pub fn extract_docx_text(path: &Path) -> Result<String, DocxError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut xml = Vec::new();
    archive.by_name("word/document.xml")?.read_to_end(&mut xml)?;
    Ok(document_xml_to_text(&decode_utf8_lossy_drop(&xml)))
}

pub(crate) fn document_xml_to_text(xml: &str) -> String {
    static PARAGRAPH_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>").unwrap());
    static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<]+?>").unwrap());
    static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r]+").unwrap());

    let text = PARAGRAPH_END_RE.replace_all(xml, "\n");
    let text = TAG_RE.replace_all(&text, " ");
    let text = SPACE_RE.replace_all(&text, " ");
    sanitize(&unescape_entities(&text))
}

fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>Data</w:t></w:r><w:r><w:t xml:space="preserve"> Engineer</w:t></w:r></w:p>
            <w:p><w:r><w:t>R&amp;D at Initech</w:t></w:r></w:p>
            </w:body></w:document>"#;
        assert_eq!(
            document_xml_to_text(xml),
            "Jane Doe\nData Engineer\nR&D at Initech"
        );
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(extract_docx_text(&path), Err(DocxError::Zip(_))));
    }
}
