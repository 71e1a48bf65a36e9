//! Wire formats for Moltbook API requests

use serde::{Deserialize, Serialize};

/// Body for `POST /posts/{id}/comments`
#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest<'a> {
    pub content: &'a str,
}

/// Body for the flat `POST /comments` fallback
#[derive(Debug, Clone, Serialize)]
pub struct FlatCommentRequest<'a> {
    pub post_id: &'a str,
    pub content: &'a str,
}

/// Body for `POST /agents/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Raw `POST /agents/register` response
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub agent: Option<Registration>,
}

/// Credentials issued to a newly registered agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub api_key: String,
    /// URL a human must visit to claim the agent
    #[serde(default)]
    pub claim_url: Option<String>,
    #[serde(default)]
    pub verification_code: Option<String>,
}
