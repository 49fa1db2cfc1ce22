use serde::{Deserialize, Serialize};

/// Reply of `GET /health` on the orchestration backend.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub gmail_agent_initialized: Option<bool>,
    #[serde(default)]
    pub gmail_init_error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    /// Only an explicit `false` counts; older backends omit the flag.
    pub fn email_unavailable(&self) -> bool {
        self.gmail_agent_initialized == Some(false)
    }
}
