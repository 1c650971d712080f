use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub todo: TodoConfig,
}

/// Settings for the HTTP API behind the user query screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the user endpoint is resolved against.
    pub base_url: String,
    /// Total request timeout in seconds.
    pub timeout_seconds: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            timeout_seconds: 10,
            connect_timeout_seconds: 5,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Settings for the todo screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Text the draft starts with.
    pub initial_draft: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            initial_draft: "Buy groceries".to_string(),
        }
    }
}
