//! Client configuration

use serde::{Deserialize, Serialize};

/// Connection settings for [`HttpTransport`](crate::transport::HttpTransport)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL
    pub url: String,
    /// Database all requests are scoped to
    pub database: String,
    /// Basic auth user name
    pub username: String,
    /// Basic auth password (None = no auth header)
    pub password: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8529".to_string(),
            database: "_system".to_string(),
            username: "root".to_string(),
            password: None,
            timeout_secs: 60,
        }
    }
}
