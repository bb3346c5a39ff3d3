use std::io::Write;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use folio_core::{HistoryStore, InMemoryHistoryStore};
use folio_ingest::pipeline::DEFAULT_PREVIEW_CHARS;
use folio_ingest::request::ResumeRequest;
use folio_ingest::{Pipeline, ResumeHandler, handler::UNREADABLE_MESSAGE};
use folio_parsing::ParsingConfig;
use folio_pdf::{ChainThresholds, StrategyChain};

const RESUME: &str = "John Smith\nSoftware Engineer\njohn@acme.com\n+1 415 555 0100\n\
    Experience\nAcme Corp - Software Engineer\n2019 - 2022\nBuilt APIs.\n\
    Education\nB.Tech Computer Science, 2018\nSkills: Python, React, AWS, PostgreSQL";

fn handler() -> (ResumeHandler, Arc<InMemoryHistoryStore>) {
    let store = Arc::new(InMemoryHistoryStore::new());
    let pipeline = Pipeline::with_parts(
        StrategyChain::fallbacks_only(ChainThresholds::default()),
        ParsingConfig::default(),
        DEFAULT_PREVIEW_CHARS,
    );
    (ResumeHandler::new(pipeline, store.clone()), store)
}

fn parse_request(file_name: &str, bytes: &[u8]) -> ResumeRequest {
    ResumeRequest {
        action: "parseResume".into(),
        user_email: Some("upload@example.com".into()),
        file_name: file_name.into(),
        file_type: "text/plain".into(),
        file_content: Some(STANDARD.encode(bytes)),
        ..Default::default()
    }
}

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document><w:body>{body}</w:body></w:document>"#
    );

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn parse_plain_text_resume() {
    let (handler, store) = handler();
    let resp = handler.handle(&parse_request("resume.txt", RESUME.as_bytes()));
    assert_eq!(resp.status_code, 200);
    assert!(resp.is_success());

    let body = &resp.body;
    assert_eq!(body["extractionMethod"], "plain_text");
    assert_eq!(body["textLength"], RESUME.chars().count());
    assert_eq!(body["extractedText"], RESUME);
    assert_eq!(body["portfolioData"]["personal"]["name"], "John Smith");
    assert_eq!(body["portfolioData"]["personal"]["email"], "john@acme.com");
    assert_eq!(body["portfolioData"]["experience"][0]["company"], "Acme Corp");
    assert_eq!(body["portfolioData"]["education"][0]["year"], "2018");
    assert!(body.get("portfolioId").is_none(), "no userId, nothing saved");
    assert!(store.list("anyone").unwrap().is_empty());
}

#[test]
fn parse_docx_resume() {
    let (handler, _) = handler();
    let bytes = docx_bytes(&RESUME.split('\n').collect::<Vec<_>>());
    let resp = handler.handle(&parse_request("resume.docx", &bytes));
    assert!(resp.is_success(), "{:?}", resp.body);
    assert_eq!(resp.body["extractionMethod"], "docx");
    assert_eq!(resp.body["portfolioData"]["personal"]["name"], "John Smith");
}

#[test]
fn parse_saves_history_then_delete() {
    let (handler, store) = handler();
    let mut request = parse_request("resume.txt", RESUME.as_bytes());
    request.user_id = Some("user-1".into());
    let resp = handler.handle(&request);
    let portfolio_id = resp.body["portfolioId"].as_str().unwrap().to_string();

    let saved = store.list("user-1").unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].portfolio_id, portfolio_id);
    assert_eq!(saved[0].name, "John Smith");
    assert_eq!(saved[0].user_email, "upload@example.com");

    let history = handler.handle_json(r#"{"action":"getPortfolioHistory","userId":"user-1"}"#);
    assert!(history.is_success());
    let entries = history.body["history"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["portfolioId"], portfolio_id.as_str());
    assert_eq!(entries[0]["extractionMethod"], "plain_text");
    assert_eq!(entries[0]["summary"]["experienceCount"], 1);

    let delete = json!({
        "action": "deletePortfolio",
        "userId": "user-1",
        "portfolioId": portfolio_id,
    });
    let resp = handler.handle_json(&delete.to_string());
    assert_eq!(resp.body["success"], true);
    assert_eq!(resp.body["message"], "Portfolio deleted successfully");
    assert!(store.list("user-1").unwrap().is_empty());

    let again = handler.handle_json(&delete.to_string());
    assert_eq!(again.status_code, 200);
    assert_eq!(again.body["success"], false);
}

#[test]
fn unreadable_upload_is_user_actionable_error() {
    let (handler, _) = handler();
    let resp = handler.handle(&parse_request("scan.pdf", b"%PDF-1.4\n%%EOF"));
    assert_eq!(resp.status_code, 400);
    assert_eq!(resp.body["error"], UNREADABLE_MESSAGE);

    let resp = handler.handle(&parse_request("notes.txt", b"hi"));
    assert_eq!(resp.body["error"], UNREADABLE_MESSAGE);
}

#[test]
fn request_validation() {
    let (handler, _) = handler();
    let cases: &[(&str, &str)] = &[
        (r#"{"action":"parseResume"}"#, "No resume provided"),
        (r#"{"action":"getPortfolioHistory"}"#, "User ID is required"),
        (
            r#"{"action":"deletePortfolio","userId":"u"}"#,
            "User ID and Portfolio ID are required",
        ),
        ("{not json", "Invalid JSON in request body"),
    ];
    for (body, message) in cases {
        let resp = handler.handle_json(body);
        assert_eq!(resp.status_code, 400, "{body}");
        assert_eq!(resp.body["error"], *message, "{body}");
    }

    let resp = handler.handle_json(r#"{"action":"parseResume","fileContent":"@@@"}"#);
    assert_eq!(resp.status_code, 400);
    assert!(resp.body["error"].as_str().unwrap().starts_with("invalid file content"));

    let resp = handler.handle_json(r#"{"action":"generatePortfolio"}"#);
    assert_eq!(
        resp.body["error"],
        Value::from(
            "Invalid action: generatePortfolio. Valid actions: parseResume, getPortfolioHistory, deletePortfolio"
        )
    );
}
