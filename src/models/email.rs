use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::detail_text;

/// Body of `POST /gmail/send`. The backend drafts subject and body from `task`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailRequest {
    pub task: String,
    pub to: Vec<String>,
    pub tone: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub email_preview: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl EmailResponse {
    /// The server's explanation of a failure, whichever field it used.
    pub fn failure_reason(&self) -> String {
        self.detail
            .as_ref()
            .map(detail_text)
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Failed to send email".to_string())
    }

    /// Pretty JSON of what the backend actually sent, for the confirmation bubble.
    pub fn preview_text(&self) -> String {
        match &self.email_preview {
            Some(preview) => serde_json::to_string_pretty(preview).unwrap_or_else(|_| preview.to_string()),
            None => "(no preview returned)".to_string(),
        }
    }
}

/// Splits a comma separated recipient field into addresses, dropping blanks.
pub fn parse_recipients(field: &str) -> Vec<String> {
    field
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(String::from)
        .collect()
}
