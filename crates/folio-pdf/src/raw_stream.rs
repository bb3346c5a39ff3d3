//! Last-resort extraction that scans the file bytes directly.
//!
//! Every `stream ... endstream` body is zlib-inflated and searched for text
//! showing operators. The whole file is also read as Latin-1 and searched
//! the same way, which catches uncompressed content in older PDFs.

use std::io::Read;
use std::path::Path;

use flate2::read::ZlibDecoder;
use once_cell::sync::Lazy;
use regex::Regex;

use folio_core::text_utils::{decode_latin1, decode_utf8_lossy_drop, is_printable};
use folio_core::{BackendError, PdfBackend};

static STREAM_RE: Lazy<regex::bytes::Regex> =
    Lazy::new(|| regex::bytes::Regex::new(r"(?s-u)stream\s*\n(.*?)\nendstream").unwrap());

static TJ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\(([^)]*)\)\s*Tj").unwrap());
static TJ_ARRAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[(.*?)\]\s*TJ").unwrap());
static HEX_TJ_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([0-9A-Fa-f]+)>\s*Tj").unwrap());
static BT_ET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)BT\s*(.*?)\s*ET").unwrap());
static ARRAY_STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").unwrap());
static BLOCK_STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static SENTENCE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.!?])\s+([A-Z])").unwrap());
static OCTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([0-7]{1,3})").unwrap());

/// Regex scan of content streams; needs nothing from the PDF object model.
#[derive(Debug, Default)]
pub struct RawStreamBackend;

impl RawStreamBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for RawStreamBackend {
    fn name(&self) -> &'static str {
        "raw_stream"
    }

    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let bytes = std::fs::read(path)?;
        Ok(extract_from_bytes(&bytes))
    }
}

/// Run the raw-stream scan over an in-memory PDF.
pub fn extract_from_bytes(pdf: &[u8]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for caps in STREAM_RE.captures_iter(pdf) {
        let Some(body) = caps.get(1) else { continue };
        let mut inflated = Vec::new();
        if ZlibDecoder::new(body.as_bytes())
            .read_to_end(&mut inflated)
            .is_err()
        {
            continue;
        }
        let found = text_from_content(&decode_utf8_lossy_drop(&inflated));
        if !found.is_empty() {
            parts.push(found);
        }
    }

    let whole = text_from_content(&decode_latin1(pdf));
    let joined = parts.join(" ");
    if !whole.is_empty() && whole.chars().count() > joined.chars().count() {
        tracing::debug!(
            streams = parts.len(),
            "raw_stream: uncompressed scan found more text than inflated streams"
        );
        return whole;
    }
    joined
}

/// Text shown by `Tj`, `TJ` and everything quoted inside `BT ... ET`.
pub fn text_from_content(content: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for caps in TJ_RE.captures_iter(content) {
        let text = decode_pdf_string(&caps[1]);
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }

    for caps in TJ_ARRAY_RE.captures_iter(content) {
        let line: String = ARRAY_STRING_RE
            .captures_iter(&caps[1])
            .map(|s| decode_pdf_string(&s[1]))
            .collect();
        if !line.is_empty() {
            parts.push(line);
        }
    }

    for caps in HEX_TJ_RE.captures_iter(content) {
        if let Some(bytes) = decode_hex(&caps[1]) {
            let text = decode_utf8_lossy_drop(&bytes);
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }
    }

    for caps in BT_ET_RE.captures_iter(content) {
        let block: Vec<String> = BLOCK_STRING_RE
            .captures_iter(&caps[1])
            .map(|s| decode_pdf_string(&s[1]))
            .filter(|s| !s.is_empty())
            .collect();
        if !block.is_empty() {
            parts.push(block.join(" "));
        }
    }

    let result = parts.join(" ");
    SENTENCE_BREAK_RE.replace_all(&result, "$1\n$2").into_owned()
}

/// Undo PDF literal-string escapes and drop non-printable characters.
pub fn decode_pdf_string(s: &str) -> String {
    let s = s
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
        .replace("\\(", "(")
        .replace("\\)", ")")
        .replace("\\\\", "\\");

    let s = OCTAL_RE.replace_all(&s, |caps: &regex::Captures| {
        u32::from_str_radix(&caps[1], 8)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    s.chars()
        .filter(|&c| c == '\n' || c == '\t' || is_printable(c))
        .collect()
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn pdf_with_stream(body: &[u8]) -> Vec<u8> {
        let mut pdf = b"%PDF-1.4\n1 0 obj\n<< /Filter /FlateDecode >>\nstream\n".to_vec();
        pdf.extend_from_slice(body);
        pdf.extend_from_slice(b"\nendstream\nendobj\n%%EOF\n");
        pdf
    }

    #[test]
    fn test_decode_pdf_string_escapes() {
        assert_eq!(decode_pdf_string(r"Smith \(PhD\)"), "Smith (PhD)");
        assert_eq!(decode_pdf_string(r"a\050b\051"), "a(b)");
        assert_eq!(decode_pdf_string("tab\\there"), "tab\there");
        // Carriage returns and other controls are dropped.
        assert_eq!(decode_pdf_string("x\\ry\u{7}"), "xy");
    }

    #[test]
    fn test_text_operators() {
        assert_eq!(text_from_content("(Hello) Tj"), "Hello");
        // Inside BT/ET the same string is picked up a second time.
        assert_eq!(text_from_content("BT (Hi) Tj ET"), "Hi Hi");
        assert_eq!(text_from_content("[(Wor) -120 (ld)] TJ"), "World");
        assert_eq!(text_from_content("<4A616E65> Tj"), "Jane");
    }

    #[test]
    fn test_sentence_breaks_restored() {
        let out = text_from_content("[(Built APIs. Led a team.)] TJ");
        assert_eq!(out, "Built APIs.\nLed a team.");
    }

    #[test]
    fn test_inflates_compressed_streams() {
        let content = b"BT /F1 12 Tf 72 720 Td [(Jane) ( Doe)] TJ ET";
        let pdf = pdf_with_stream(&deflate(content));
        let text = extract_from_bytes(&pdf);
        assert!(text.contains("Jane Doe"), "got {text:?}");
    }

    #[test]
    fn test_corrupt_stream_skipped() {
        let pdf = pdf_with_stream(b"\x00\x01 not zlib at all");
        assert_eq!(extract_from_bytes(&pdf), "");
    }

    #[test]
    fn test_uncompressed_content_wins_when_longer() {
        let pdf = pdf_with_stream(b"BT (Uncompressed resume text for Jane Doe) Tj ET");
        let text = extract_from_bytes(&pdf);
        assert!(text.contains("Uncompressed resume text for Jane Doe"));
    }

    #[test]
    fn test_backend_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, pdf_with_stream(&deflate(b"(Jane Doe) Tj"))).unwrap();
        let text = RawStreamBackend::new().extract_text(&path).unwrap();
        assert!(text.contains("Jane Doe"));
        assert!(matches!(
            RawStreamBackend::new().extract_text(&dir.path().join("missing.pdf")),
            Err(BackendError::Io(_))
        ));
    }
}
