use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::MAX_RESULTS;
use crate::models::detail_text;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WebSearchRequest {
    pub query: String,
    pub max_results: u32,
}

impl WebSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        WebSearchRequest {
            query: query.into(),
            max_results: MAX_RESULTS,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WebSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub results: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<Value>,
}

/// What the agent handed back, reduced to the two shapes the formatter knows.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPayload {
    List(Vec<String>),
    Text(String),
}

impl SearchPayload {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Array(items) => Some(SearchPayload::List(items.iter().map(value_text).collect())),
            other => Some(SearchPayload::Text(value_text(other))),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl WebSearchResponse {
    /// `result` wins over `results` when the backend sends both.
    pub fn payload(&self) -> Option<SearchPayload> {
        self.result
            .as_ref()
            .and_then(SearchPayload::from_value)
            .or_else(|| self.results.as_ref().and_then(SearchPayload::from_value))
    }

    pub fn failure_reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.detail.as_ref().map(detail_text))
            .unwrap_or_else(|| "Search failed".to_string())
    }
}
