//! Comment fetching
//!
//! Comments have lived behind three different endpoint conventions. Each is
//! tried in order and the first success wins; its payload is decoded with
//! [`molt_client::decode::decode_comments`].

use molt_client::decode::decode_comments;
use molt_client::{ApiResponse, MoltTransport};
use molt_core::{Comment, Result};
use tracing::{debug, warn};

/// Endpoint conventions for listing a post's comments, in the order tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRoute {
    /// `GET /posts/{id}/comments`
    PostScoped,
    /// `GET /comments?post_id={id}`
    PostQuery,
    /// `GET /posts/{id}?include=comments`
    IncludeExpansion,
}

impl CommentRoute {
    pub const ALL: [CommentRoute; 3] = [Self::PostScoped, Self::PostQuery, Self::IncludeExpansion];

    async fn fetch<T: MoltTransport + ?Sized>(
        self,
        transport: &T,
        post_id: &str,
    ) -> Result<ApiResponse> {
        match self {
            Self::PostScoped => {
                transport
                    .get(&format!("/posts/{}/comments", post_id), &[])
                    .await
            }
            Self::PostQuery => transport.get("/comments", &[("post_id", post_id)]).await,
            Self::IncludeExpansion => {
                transport
                    .get(&format!("/posts/{}", post_id), &[("include", "comments")])
                    .await
            }
        }
    }
}

/// Comments on `post_id` in provider order; empty when every endpoint fails
pub async fn fetch_comments<T: MoltTransport + ?Sized>(transport: &T, post_id: &str) -> Vec<Comment> {
    for route in CommentRoute::ALL {
        match route.fetch(transport, post_id).await {
            Ok(response) if response.is_success() => {
                return decode_comments(response.json());
            }
            Ok(response) => {
                debug!(
                    "{:?} comments for post {} returned status {}",
                    route, post_id, response.status
                );
            }
            Err(e) => {
                debug!("{:?} comments for post {} failed: {}", route, post_id, e);
            }
        }
    }

    warn!(
        "Failed to get comments for post {}, tried multiple endpoints",
        post_id
    );
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use molt_client::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_first_route_wins() {
        let mock = MockTransport::new()
            .with_json("GET /posts/7/comments", 200, json!({"comments": [{"id": "c1"}]}))
            .with_json("GET /comments?post_id=7", 200, json!([{"id": "other"}]));

        let comments = fetch_comments(&mock, "7").await;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, "c1");
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_through_to_include_expansion() {
        let mock = MockTransport::new()
            .with_status("GET /posts/7/comments", 404)
            .with_json(
                "GET /posts/7?include=comments",
                200,
                json!({"id": "7", "comments": [{"id": "c9", "author": {"name": "reef"}}]}),
            );

        let comments = fetch_comments(&mock, "7").await;
        assert_eq!(comments, vec![Comment::new("c9", "reef", "")]);
        assert_eq!(
            mock.call_keys(),
            vec![
                "GET /posts/7/comments",
                "GET /comments?post_id=7",
                "GET /posts/7?include=comments",
            ]
        );
    }

    #[tokio::test]
    async fn test_all_routes_fail_is_empty() {
        let mock = MockTransport::new().with_status("GET /comments?post_id=7", 500);
        assert!(fetch_comments(&mock, "7").await.is_empty());
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_success_with_empty_object() {
        let mock = MockTransport::new().with_json("GET /posts/7/comments", 200, json!({}));
        assert!(fetch_comments(&mock, "7").await.is_empty());
    }
}
