use log::warn;

use crate::config::{SEARCH_HISTORY_KEY, SEARCH_HISTORY_LIMIT};
use crate::error::ChatError;
use crate::services::storage_service::KeyValueStore;

/// Past web-search queries, most recent first, without duplicates, at most
/// `SEARCH_HISTORY_LIMIT` long.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the persisted list. A missing or unparsable entry yields an empty history.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, ChatError> {
        let Some(raw) = store.get(SEARCH_HISTORY_KEY)? else {
            return Ok(Self::new());
        };
        let stored: Vec<String> = serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable search history: {}", e);
            Vec::new()
        });
        let mut history = Self::new();
        // Oldest first so the stored order survives and the invariant is re-established.
        for query in stored.into_iter().rev() {
            history.record(query);
        }
        Ok(history)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<(), ChatError> {
        let raw = serde_json::to_string(&self.entries).map_err(|e| ChatError::Storage(e.to_string()))?;
        store.set(SEARCH_HISTORY_KEY, &raw)
    }

    pub fn record(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.entries.retain(|existing| *existing != query);
        self.entries.insert(0, query);
        self.entries.truncate(SEARCH_HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}
