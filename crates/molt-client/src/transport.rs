//! Transport abstraction for Moltbook API calls

use async_trait::async_trait;
use molt_core::Result;
use serde_json::Value;

/// Maximum characters of a response body quoted in logs
const BODY_SNIPPET_CHARS: usize = 200;

/// Status and raw body of a provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a response carrying a JSON body
    pub fn json_body(status: u16, value: &Value) -> Self {
        Self::new(status, value.to_string())
    }

    /// The provider signals success with 200 or 201 only
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }

    /// Parse the body as JSON; empty or invalid bodies become `Value::Null`
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// Leading part of the body, for log lines
    pub fn snippet(&self) -> String {
        let mut snippet: String = self.body.chars().take(BODY_SNIPPET_CHARS).collect();
        if self.body.chars().count() > BODY_SNIPPET_CHARS {
            snippet.push_str("...");
        }
        snippet
    }
}

/// Trait for issuing Moltbook API calls (allows mocking in tests)
///
/// Paths are relative to the configured base URL and start with `/`.
#[async_trait]
pub trait MoltTransport: Send + Sync {
    /// Issue a GET with optional query parameters
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse>;

    /// Issue a POST with a JSON body
    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse>;
}

/// Canonical `"METHOD /path?k=v"` form of a request, used for logging and mocks
pub fn request_key(method: &str, path: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        format!("{} {}", method, path)
    } else {
        let params: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{} {}?{}", method, path, params.join("&"))
    }
}
