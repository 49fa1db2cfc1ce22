use std::env;
use std::path::PathBuf;
use url::Url;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const SEND_EMAIL_PATH: &str = "/gmail/send";
pub const UPLOAD_PATH: &str = "/api/upload";
pub const PDF_SEARCH_PATH: &str = "/api/search";
pub const AGENT_SEARCH_PATH: &str = "/agent/search";
pub const HEALTH_PATH: &str = "/health";

/// Fixed page size for both document questions and web searches.
pub const MAX_RESULTS: u32 = 5;

pub const SEARCH_HISTORY_KEY: &str = "searchHistory";
pub const SEARCH_HISTORY_LIMIT: usize = 10;

const DEFAULT_BACKEND_URL: &'static str = "http://localhost:8000";
const DEFAULT_STORAGE_PATH: &'static str = ".orchestrator_chat/storage.json";

const BACKEND_URL_VAR: &str = "ORCHESTRATOR_URL";
const STORAGE_PATH_VAR: &str = "CHAT_STORAGE_PATH";

pub fn default_backend_url() -> String {
    String::from(DEFAULT_BACKEND_URL)
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: Url,
    pub storage_path: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, url::ParseError> {
        let backend_url = env::var(BACKEND_URL_VAR).unwrap_or_else(|_| default_backend_url());
        let storage_path = env::var(STORAGE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));
        Self::new(&backend_url, storage_path)
    }

    pub fn new(backend_url: &str, storage_path: PathBuf) -> Result<Self, url::ParseError> {
        Ok(Settings {
            backend_url: Url::parse(backend_url)?,
            storage_path,
        })
    }
}
