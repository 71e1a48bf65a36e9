//! Mock transport for testing

use crate::transport::{request_key, ApiResponse, MoltTransport};
use async_trait::async_trait;
use molt_core::{MoltError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// `"METHOD /path?query"`
    pub key: String,
    /// JSON body for POST requests
    pub body: Option<Value>,
}

/// Scripted transport keyed by `"METHOD /path?query"`
///
/// Requests without a scripted response fail with a transport error, the
/// same way an unreachable provider would. Every request is recorded.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: HashMap<String, ApiResponse>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a raw response for `key`
    pub fn with_response(mut self, key: &str, response: ApiResponse) -> Self {
        self.responses.insert(key.to_string(), response);
        self
    }

    /// Script a JSON response for `key`
    pub fn with_json(self, key: &str, status: u16, body: Value) -> Self {
        self.with_response(key, ApiResponse::json_body(status, &body))
    }

    /// Script a bodyless response for `key`
    pub fn with_status(self, key: &str, status: u16) -> Self {
        self.with_response(key, ApiResponse::new(status, ""))
    }

    /// All requests issued so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Keys of all requests issued so far, in order
    pub fn call_keys(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.key).collect()
    }

    /// Bodies of POST requests sent to `path`
    pub fn posted_to(&self, path: &str) -> Vec<Value> {
        let key = request_key("POST", path, &[]);
        self.calls()
            .into_iter()
            .filter(|c| c.key == key)
            .filter_map(|c| c.body)
            .collect()
    }

    fn respond(&self, key: String, body: Option<Value>) -> Result<ApiResponse> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                key: key.clone(),
                body,
            });
        }
        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| MoltError::Transport(format!("No mock response for: {}", key)))
    }
}

#[async_trait]
impl MoltTransport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse> {
        self.respond(request_key("GET", path, query), None)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.respond(request_key("POST", path, &[]), Some(body.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_and_unscripted() {
        let mock = MockTransport::new().with_json("GET /agents/me", 200, json!({"id": "1"}));

        let response = mock.get("/agents/me", &[]).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.json()["id"], "1");

        let missing = mock.get("/posts", &[("author_id", "1")]).await;
        assert!(matches!(missing, Err(MoltError::Transport(_))));

        assert_eq!(
            mock.call_keys(),
            vec!["GET /agents/me", "GET /posts?author_id=1"]
        );
    }

    #[tokio::test]
    async fn test_records_post_bodies() {
        let mock = MockTransport::new().with_status("POST /posts", 201);
        mock.post("/posts", &json!({"title": "t"})).await.unwrap();

        assert_eq!(mock.posted_to("/posts"), vec![json!({"title": "t"})]);
        assert!(mock.posted_to("/comments").is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_call_log() {
        let mock = MockTransport::new().with_status("GET /agents/me", 401);
        let clone = mock.clone();
        clone.get("/agents/me", &[]).await.unwrap();
        assert_eq!(mock.calls().len(), 1);
    }
}
