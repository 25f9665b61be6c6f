//! API Client
//!
//! Thin HTTP client over the management API, used by the CLI to talk to a
//! running daemon.

use reqwest::Client;
use serde_json::Value;

use crate::types::{MgmtError, Result};

/// Client for a running management API daemon
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// `GET /api/health`
    pub async fn health(&self) -> Result<Value> {
        self.get("/api/health").await
    }

    /// `GET /api/config`
    pub async fn config(&self) -> Result<Value> {
        self.get("/api/config").await
    }

    /// `GET /api/config/{section}`
    pub async fn section(&self, section: &str) -> Result<Value> {
        self.get(&format!("/api/config/{}", section)).await
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        Err(MgmtError::BadRequest(format!(
            "API error ({}): {}",
            status.as_u16(),
            message
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8080/");
        assert_eq!(client.base_url, "http://127.0.0.1:8080");
    }
}
