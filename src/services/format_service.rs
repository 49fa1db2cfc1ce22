//! Cosmetic cleanup of the search agent's output before it becomes a chat bubble.
//!
//! The agent returns free text (sometimes double-escaped JSON text) or a list of
//! strings. Nothing here parses meaning; it only makes the text readable.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::web_search::SearchPayload;

const BULLET: char = '•';

lazy_static! {
    static ref ESCAPED_NEWLINE: Regex = Regex::new(r"(?:\\r)?\\n").unwrap();
    static ref ESCAPED_QUOTE: Regex = Regex::new(r#"\\""#).unwrap();
}

pub fn format_search_results(payload: &SearchPayload) -> String {
    match payload {
        SearchPayload::List(items) => numbered_list(items),
        SearchPayload::Text(text) => format_text(text),
    }
}

fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unescapes, then bullets line by line unless the agent already used bullets or dashes.
pub fn format_text(text: &str) -> String {
    let unescaped = ESCAPED_NEWLINE.replace_all(text, "\n");
    let unescaped = ESCAPED_QUOTE.replace_all(&unescaped, "\"");

    if unescaped.contains(BULLET) || unescaped.contains('-') {
        return unescaped.trim().to_string();
    }

    unescaped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{} {}", BULLET, line))
        .collect::<Vec<_>>()
        .join("\n")
}
