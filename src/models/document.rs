use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::config::MAX_RESULTS;
use crate::error::ChatError;
use crate::models::detail_text;

/// A local file read into memory, ready for the multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn from_path(path: &Path) -> Result<Self, ChatError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ChatError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(UploadFile { name, bytes })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chunks_added: Option<u64>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl UploadResponse {
    pub fn failure_reason(&self) -> String {
        self.detail
            .as_ref()
            .map(detail_text)
            .unwrap_or_else(|| "Upload failed".to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PdfQuestionRequest {
    pub question: String,
    pub max_results: u32,
}

impl PdfQuestionRequest {
    pub fn new(question: impl Into<String>) -> Self {
        PdfQuestionRequest {
            question: question.into(),
            max_results: MAX_RESULTS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PdfAnswer {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub chunks_found: Option<u64>,
}

impl PdfAnswer {
    pub fn failure_reason(&self) -> String {
        self.detail
            .as_ref()
            .map(detail_text)
            .unwrap_or_else(|| "No answer returned".to_string())
    }
}
