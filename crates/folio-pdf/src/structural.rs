use std::path::Path;

use lopdf::Document;

use folio_core::{BackendError, PdfBackend, join_pages};

/// Page-by-page text extraction through the PDF object model.
///
/// Pages whose content cannot be decoded are logged and skipped so that one
/// broken page does not discard the rest of the document.
#[derive(Debug, Default)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let document = Document::load(path).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let pages = document
            .get_pages()
            .into_keys()
            .map(|page_num| document.extract_text(&[page_num]));
        Ok(join_pages(self.name(), pages))
    }
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    use super::*;

    /// One page per operation list, all sharing a Courier font resource.
    fn write_pdf(path: &Path, pages: Vec<Vec<Operation>>) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for operations in pages {
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }
        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    fn text_page(font: Object, line: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font, 11.into()]),
            Operation::new("Td", vec![60.into(), 760.into()]),
            Operation::new("Tj", vec![Object::string_literal(line)]),
            Operation::new("ET", vec![]),
        ]
    }

    #[test]
    fn test_broken_page_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        // A font operand that is not a name makes the first page undecodable.
        write_pdf(
            &path,
            vec![
                text_page(7.into(), "Lost page"),
                text_page("F1".into(), "Kept page"),
            ],
        );

        let text = LopdfBackend::new().extract_text(&path).unwrap();
        assert!(text.contains("Kept page"), "got {text:?}");
        assert!(!text.contains("Lost page"), "got {text:?}");
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        write_pdf(
            &path,
            vec![
                text_page("F1".into(), "First page"),
                text_page("F1".into(), "Second page"),
            ],
        );

        let text = LopdfBackend::new().extract_text(&path).unwrap();
        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        assert!(first < second);
        assert!(text[first..second].contains("\n\n"), "got {text:?}");
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = LopdfBackend::new()
            .extract_text(Path::new("/nonexistent/resume.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }

    #[test]
    fn test_not_a_pdf_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"plain text pretending to be a pdf").unwrap();
        assert!(matches!(
            LopdfBackend::new().extract_text(&path),
            Err(BackendError::OpenError(_))
        ));
    }
}
