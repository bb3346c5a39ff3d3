use std::sync::Arc;

use serde_json::json;

use folio_core::{HistoryRecord, HistoryStore, RawDocument};

use crate::IngestError;
use crate::pipeline::Pipeline;
use crate::request::{Action, HandlerResponse, ResumeRequest};

/// Shown when no readable text could be extracted from an upload.
pub const UNREADABLE_MESSAGE: &str = "Could not extract text from resume. This usually happens when: \
    1) The PDF is scanned/image-based (not selectable text), \
    2) The PDF uses unusual fonts or encoding. \
    Try uploading a different PDF or a Word document (.docx).";

/// Dispatches [`ResumeRequest`]s to the pipeline and the history store.
pub struct ResumeHandler {
    pipeline: Pipeline,
    store: Arc<dyn HistoryStore>,
}

impl ResumeHandler {
    pub fn new(pipeline: Pipeline, store: Arc<dyn HistoryStore>) -> Self {
        Self { pipeline, store }
    }

    /// Handle a raw JSON request body.
    pub fn handle_json(&self, body: &str) -> HandlerResponse {
        match serde_json::from_str::<ResumeRequest>(body) {
            Ok(request) => self.handle(&request),
            Err(e) => {
                tracing::debug!(error = %e, "rejecting malformed request body");
                HandlerResponse::error("Invalid JSON in request body")
            }
        }
    }

    pub fn handle(&self, request: &ResumeRequest) -> HandlerResponse {
        tracing::info!(action = %request.action, "handling request");
        match Action::from_name(&request.action) {
            Some(Action::ParseResume) => self.parse_resume(request),
            Some(Action::GetPortfolioHistory) => self.portfolio_history(request),
            Some(Action::DeletePortfolio) => self.delete_portfolio(request),
            None => {
                let valid: Vec<&str> = Action::ALL.iter().map(Action::name).collect();
                HandlerResponse::error(format!(
                    "Invalid action: {}. Valid actions: {}",
                    request.action,
                    valid.join(", ")
                ))
            }
        }
    }

    fn parse_resume(&self, request: &ResumeRequest) -> HandlerResponse {
        let Some(payload) = request.file_content.as_deref().filter(|p| !p.trim().is_empty())
        else {
            return HandlerResponse::error("No resume provided");
        };

        let doc = match RawDocument::from_base64(payload, &request.file_name, &request.file_type) {
            Ok(doc) => doc,
            Err(e) => {
                return HandlerResponse::error(
                    IngestError::InvalidPayload(e.to_string()).to_string(),
                );
            }
        };

        let user_email = request.user_email.as_deref().unwrap_or("");
        let fallback = Some(user_email).filter(|e| !e.is_empty());
        let output = match self.pipeline.run(&doc, fallback) {
            Ok(output) => output,
            Err(IngestError::UnreadableDocument { file_name, reason }) => {
                tracing::info!(%file_name, %reason, "resume unreadable");
                return HandlerResponse::error(UNREADABLE_MESSAGE);
            }
            Err(e) => return HandlerResponse::error(e.to_string()),
        };

        let mut body = json!({
            "success": true,
            "portfolioData": output.record,
            "extractedText": self.pipeline.preview(&output.text.text),
            "extractionMethod": output.text.method.label(),
            "textLength": output.text.char_len(),
        });

        if let Some(user_id) = request.user_id.as_deref().filter(|id| !id.is_empty()) {
            let entry = HistoryRecord::new(
                user_id,
                user_email,
                &request.file_name,
                output.text.method,
                &output.record,
            );
            match self.store.save(&entry) {
                Ok(()) => body["portfolioId"] = json!(entry.portfolio_id),
                // Saving history is best-effort.
                Err(e) => tracing::warn!(%user_id, error = %e, "failed to save portfolio history"),
            }
        }

        HandlerResponse::ok(body)
    }

    fn portfolio_history(&self, request: &ResumeRequest) -> HandlerResponse {
        let Some(user_id) = request.user_id.as_deref().filter(|id| !id.is_empty()) else {
            return HandlerResponse::error("User ID is required");
        };
        match self.store.list(user_id) {
            Ok(history) => HandlerResponse::ok(json!({ "success": true, "history": history })),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "failed to read portfolio history");
                HandlerResponse::ok(json!({ "success": true, "history": [] }))
            }
        }
    }

    fn delete_portfolio(&self, request: &ResumeRequest) -> HandlerResponse {
        let user_id = request.user_id.as_deref().filter(|id| !id.is_empty());
        let portfolio_id = request.portfolio_id.as_deref().filter(|id| !id.is_empty());
        let (Some(user_id), Some(portfolio_id)) = (user_id, portfolio_id) else {
            return HandlerResponse::error("User ID and Portfolio ID are required");
        };

        let deleted = self
            .store
            .delete(user_id, portfolio_id)
            .unwrap_or_else(|e| {
                tracing::warn!(%user_id, %portfolio_id, error = %e, "failed to delete portfolio");
                false
            });
        let message = if deleted {
            "Portfolio deleted successfully"
        } else {
            "Failed to delete portfolio"
        };
        HandlerResponse::ok(json!({ "success": deleted, "message": message }))
    }
}
