use log::{info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ChatError;

/// String keyed persistence, the client-side equivalent of `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ChatError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ChatError>;
}

/// Volatile store, gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ChatError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ChatError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk. The whole map is rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store, starting empty if the file is missing or unreadable as JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ChatError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring corrupt store at {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No store at {} yet; starting empty", path.display());
                HashMap::new()
            }
            Err(source) => return Err(ChatError::Io { path, source }),
        };
        Ok(FileStore {
            path,
            entries: RefCell::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| ChatError::Storage(e.to_string()))?;
            }
        }
        let contents = serde_json::to_string_pretty(entries).map_err(|e| ChatError::Storage(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| ChatError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ChatError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    /// Memory only changes once the new map is on disk.
    fn set(&self, key: &str, value: &str) -> Result<(), ChatError> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}
