use std::path::PathBuf;

/// Everything a chat handler can fail with. Each variant renders as a single chat message.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Missing local input; the request was never issued.
    #[error("{0}")]
    Validation(String),

    /// The backend answered, but with `success: false` or without the field we needed.
    #[error("❌ Error: {0}")]
    Application(String),

    #[error("❌ Network error: {0}")]
    Transport(String),

    #[error("❌ Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("❌ Storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(error: reqwest::Error) -> Self {
        ChatError::Transport(error.to_string())
    }
}

impl From<url::ParseError> for ChatError {
    fn from(error: url::ParseError) -> Self {
        ChatError::Transport(format!("invalid backend address: {}", error))
    }
}

impl ChatError {
    /// Text shown in the transcript for this error.
    pub fn to_chat_text(&self) -> String {
        self.to_string()
    }
}
