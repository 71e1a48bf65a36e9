//! Core type definitions for Moltbot

use serde::{Deserialize, Serialize};

/// Maximum title length in characters; longer bodies are truncated for the title
pub const MAX_TITLE_CHARS: usize = 100;

/// Submolt used when none is configured
pub const DEFAULT_SUBMOLT: &str = "general";

/// The agent's identity as known to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub id: String,
    pub display_name: String,
}

impl std::fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// A published content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            id: id.into(),
            title: derive_title(&body),
            body,
        }
    }
}

/// Derive a post title from its body
///
/// Bodies of at most [`MAX_TITLE_CHARS`] characters become the title verbatim;
/// longer bodies contribute their first [`MAX_TITLE_CHARS`] characters.
pub fn derive_title(body: &str) -> String {
    match body.char_indices().nth(MAX_TITLE_CHARS) {
        Some((cut, _)) => body[..cut].to_string(),
        None => body.to_string(),
    }
}

/// Wire payload for publishing a new post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub submolt: String,
    pub title: String,
    pub content: String,
}

impl PostDraft {
    /// Build a draft for `content`, deriving the title from it
    pub fn new(submolt: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            submolt: submolt.into(),
            title: derive_title(&content),
            content,
        }
    }
}

/// A comment on one of the agent's posts, normalized from the provider's response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author_name: String,
    pub body: String,
}

impl Comment {
    pub fn new(
        id: impl Into<String>,
        author_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author_name: author_name.into(),
            body: body.into(),
        }
    }

    /// Whether this comment was written by `username` (exact, case-sensitive)
    pub fn is_authored_by(&self, username: &str) -> bool {
        self.author_name == username
    }
}

/// A reply the agent has decided to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyDecision {
    pub target_comment_id: String,
    pub chosen_reply_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_body_is_its_own_title() {
        let post = Post::new("1", "hello world");
        assert_eq!(post.title, "hello world");
        assert_eq!(post.body, "hello world");
    }

    #[test]
    fn test_long_body_title_truncated() {
        let body = "x".repeat(120);
        let draft = PostDraft::new(DEFAULT_SUBMOLT, body.clone());
        assert_eq!(draft.title, "x".repeat(100));
        assert_eq!(draft.content, body);
        assert_eq!(draft.submolt, "general");
    }

    #[test]
    fn test_title_exactly_at_limit() {
        let body = "y".repeat(100);
        assert_eq!(derive_title(&body), body);
    }

    #[test]
    fn test_title_respects_char_boundaries() {
        let body = "é".repeat(150);
        let title = derive_title(&body);
        assert_eq!(title.chars().count(), 100);
        assert!(body.starts_with(&title));
    }

    #[test]
    fn test_self_authorship_is_case_sensitive() {
        let comment = Comment::new("c1", "MoltBot", "hi");
        assert!(comment.is_authored_by("MoltBot"));
        assert!(!comment.is_authored_by("moltbot"));
    }

    proptest! {
        /// Title equals the body up to the limit and is a 100-char prefix past it.
        #[test]
        fn prop_title_derivation(body in ".{0,300}") {
            let title = derive_title(&body);
            let len = body.chars().count();
            if len <= MAX_TITLE_CHARS {
                prop_assert_eq!(&title, &body);
            } else {
                prop_assert_eq!(title.chars().count(), MAX_TITLE_CHARS);
                prop_assert!(body.starts_with(&title));
            }
        }
    }
}
