use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use folio_pdf::{ChainThresholds, ExtractionMethod, PdfBackend, StrategyChain};

const LINES: &[&str] = &[
    "Jane Doe",
    "Platform Engineer",
    "Experience",
    "Globex - Platform Engineer running Kubernetes clusters",
    "2018 - 2023",
    "Education",
    "Master of Science in Computer Science, 2017",
    "Skills: Kubernetes, Docker, Terraform, Python, PostgreSQL",
];

fn write_resume_pdf(path: &std::path::Path) {
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

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![60.into(), 760.into()]),
    ];
    for line in LINES {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn fallbacks_recover_text_from_simple_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    write_resume_pdf(&path);

    let chain = StrategyChain::fallbacks_only(ChainThresholds::default());
    let out = chain.extract(&path).expect("a fallback should clear its bar");
    assert!(matches!(
        out.method,
        ExtractionMethod::Structural | ExtractionMethod::RawStream
    ));
    assert!(out.text.contains("Kubernetes"), "got {:?}", out.text);
    assert!(out.char_len() > 100);
}

#[test]
fn raw_stream_reads_uncompressed_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    write_resume_pdf(&path);

    let text = folio_pdf::RawStreamBackend::new().extract_text(&path).unwrap();
    assert!(text.contains("Globex - Platform Engineer"));
}

#[test]
fn non_pdf_fails_every_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.pdf");
    std::fs::write(&path, "just some words, not a document").unwrap();

    let chain = StrategyChain::fallbacks_only(ChainThresholds::default());
    assert!(chain.extract(&path).is_none());
}
