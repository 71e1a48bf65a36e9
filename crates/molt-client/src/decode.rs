//! Decoding of the provider's response shapes
//!
//! The Moltbook API is not consistent about envelopes: the same resource may
//! come back bare, wrapped in a named field, or as a single object. Each
//! resource gets an explicit shape enum, classified in a fixed priority
//! order. Anything unrecognized classifies as `Empty`; decoding never fails.

use molt_core::{AgentIdentity, Comment};
use serde_json::{Map, Value};

/// Author name used when a comment carries none
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Shapes a comment listing may take, in priority order
#[derive(Debug, Clone, PartialEq)]
pub enum CommentsShape {
    /// `{"comments": [...]}`
    Envelope(Vec<Value>),
    /// `[...]`
    List(Vec<Value>),
    /// A single non-empty comment object
    Single(Map<String, Value>),
    /// Nothing usable
    Empty,
}

impl CommentsShape {
    pub fn classify(payload: Value) -> Self {
        match payload {
            Value::Object(mut map) if map.contains_key("comments") => {
                match map.remove("comments") {
                    Some(Value::Array(items)) => Self::Envelope(items),
                    _ => Self::Empty,
                }
            }
            Value::Array(items) => Self::List(items),
            Value::Object(map) if !map.is_empty() => Self::Single(map),
            _ => Self::Empty,
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            Self::Envelope(items) | Self::List(items) => items,
            Self::Single(map) => vec![Value::Object(map)],
            Self::Empty => Vec::new(),
        }
    }
}

/// Shapes a post listing may take, in priority order
#[derive(Debug, Clone, PartialEq)]
pub enum PostsShape {
    /// `{"posts": [...]}`
    Envelope(Vec<Value>),
    /// `[...]`
    List(Vec<Value>),
    /// Nothing usable
    Empty,
}

impl PostsShape {
    pub fn classify(payload: Value) -> Self {
        match payload {
            Value::Object(mut map) => match map.remove("posts") {
                Some(Value::Array(items)) => Self::Envelope(items),
                _ => Self::Empty,
            },
            Value::Array(items) => Self::List(items),
            _ => Self::Empty,
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            Self::Envelope(items) | Self::List(items) => items,
            Self::Empty => Vec::new(),
        }
    }
}

/// Render an id that may arrive as a string or a number
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `id`, falling back to a nested `post.id`
pub fn post_id(record: &Value) -> Option<String> {
    record
        .get("id")
        .and_then(id_string)
        .or_else(|| record.get("post").and_then(|p| p.get("id")).and_then(id_string))
}

/// Post ids from a listing payload; records without an id are skipped
pub fn decode_post_ids(payload: Value) -> Vec<String> {
    PostsShape::classify(payload)
        .into_records()
        .iter()
        .filter_map(post_id)
        .collect()
}

/// Normalize one comment record; non-objects yield `None`
pub fn decode_comment(record: &Value) -> Option<Comment> {
    let obj = record.as_object()?;

    let id = obj.get("id").and_then(id_string).unwrap_or_default();

    let author_name = match obj.get("author") {
        Some(Value::Object(author)) => author.get("name").and_then(Value::as_str),
        Some(Value::String(name)) => Some(name.as_str()),
        _ => None,
    }
    .or_else(|| obj.get("author_name").and_then(Value::as_str))
    .unwrap_or(UNKNOWN_AUTHOR)
    .to_string();

    let body = obj
        .get("content")
        .or_else(|| obj.get("body"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(Comment {
        id,
        author_name,
        body,
    })
}

/// Comments from a listing payload, in provider order
pub fn decode_comments(payload: Value) -> Vec<Comment> {
    CommentsShape::classify(payload)
        .into_records()
        .iter()
        .filter_map(decode_comment)
        .collect()
}

/// Identity from `/agents/me`: `{"agent": {...}}`, falling back to a bare object
pub fn decode_identity(payload: &Value) -> Option<AgentIdentity> {
    let agent = payload
        .get("agent")
        .filter(|a| a.is_object())
        .unwrap_or(payload);

    let id = agent.get("id").and_then(id_string)?;
    let display_name = agent
        .get("name")
        .or_else(|| agent.get("display_name"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string();

    Some(AgentIdentity { id, display_name })
}

/// Id of a freshly created post, when the provider reports one
pub fn decode_created_post_id(payload: &Value) -> Option<String> {
    post_id(payload)
}
