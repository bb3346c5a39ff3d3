//! JSON wire types for the action-based request interface.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// An action request. Field names are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRequest {
    pub action: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub file_name: String,
    pub file_type: String,
    /// Base64-encoded document bytes.
    pub file_content: Option<String>,
    pub portfolio_id: Option<String>,
}

impl Default for ResumeRequest {
    fn default() -> Self {
        Self {
            action: String::new(),
            user_id: None,
            user_email: None,
            file_name: "resume.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            file_content: None,
            portfolio_id: None,
        }
    }
}

/// The actions a [`ResumeRequest`] can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ParseResume,
    GetPortfolioHistory,
    DeletePortfolio,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::ParseResume,
        Action::GetPortfolioHistory,
        Action::DeletePortfolio,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ParseResume => "parseResume",
            Self::GetPortfolioHistory => "getPortfolioHistory",
            Self::DeletePortfolio => "deletePortfolio",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

/// Status code plus JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: Value,
}

impl HandlerResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    /// `400` with `{"success": false, "error": message}`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: json!({ "success": false, "error": message.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
            && self
                .body
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }
}
