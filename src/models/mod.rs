pub mod chat_message;
pub mod document;
pub mod email;
pub mod health;
pub mod search_history;
pub mod web_search;

use serde_json::Value;

/// FastAPI sends `detail` as a plain string for HTTPException and as a list of
/// objects for validation failures; both end up as one line of text.
pub(crate) fn detail_text(detail: &Value) -> String {
    match detail {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.get("msg")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
