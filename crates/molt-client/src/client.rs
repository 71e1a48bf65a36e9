//! reqwest-backed Moltbook API client
//!
//! One `reqwest::Client` is built per process with the bearer token and
//! content type installed as default headers. Requests are never retried
//! here; callers decide what a failed status means.

use crate::transport::{request_key, ApiResponse, MoltTransport};
use async_trait::async_trait;
use molt_core::{MoltConfig, MoltError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CLIENT_USER_AGENT: &str = concat!("moltbot/", env!("CARGO_PKG_VERSION"));

/// HTTP transport for the Moltbook API
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client; `api_key` is attached as a bearer token when present
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key.trim()))
                .map_err(|e| MoltError::Auth(format!("Invalid API key header: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| MoltError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create an authenticated client from configuration
    pub fn from_config(config: &MoltConfig) -> Result<Self> {
        Self::new(&config.base_url, Some(config.require_api_key()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn finish(&self, key: &str, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| MoltError::Transport(format!("{} failed: {}", key, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| MoltError::Transport(format!("{}: failed to read body: {}", key, e)))?;

        debug!("{} -> {} ({} bytes)", key, status, body.len());
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl MoltTransport for HttpClient {
    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let key = request_key("GET", path, query);
        let request = self.http.get(self.url(path)).query(query);
        self.finish(&key, request).await
    }

    #[instrument(skip(self, body), fields(base = %self.base_url))]
    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let key = request_key("POST", path, &[]);
        let request = self.http.post(self.url(path)).json(body);
        self.finish(&key, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpClient::new("https://example.test/api/v1/", Some("k")).unwrap();
        assert_eq!(client.base_url(), "https://example.test/api/v1");
        assert_eq!(client.url("/agents/me"), "https://example.test/api/v1/agents/me");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = MoltConfig::default();
        assert!(matches!(
            HttpClient::from_config(&config),
            Err(MoltError::Auth(_))
        ));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = HttpClient::new("https://example.test", Some("bad\nkey"));
        assert!(matches!(result, Err(MoltError::Auth(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = HttpClient::new("http://127.0.0.1:1", Some("k")).unwrap();
        let result = client.get("/agents/me", &[]).await;
        assert!(matches!(result, Err(MoltError::Transport(_))));
    }
}
