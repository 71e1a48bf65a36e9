//! Reply publishing with endpoint fallback

use molt_client::{ApiResponse, CommentRequest, FlatCommentRequest, MoltTransport};
use molt_core::Result;
use tracing::{error, info, warn};

/// Endpoint conventions for creating a comment, in the order tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyRoute {
    /// `POST /posts/{id}/comments` with `{content}`
    PostScoped,
    /// `POST /comments` with `{post_id, content}`
    Flat,
}

impl ReplyRoute {
    pub const ALL: [ReplyRoute; 2] = [Self::PostScoped, Self::Flat];

    async fn send<T: MoltTransport + ?Sized>(
        self,
        transport: &T,
        post_id: &str,
        text: &str,
    ) -> Result<ApiResponse> {
        match self {
            Self::PostScoped => {
                let body = serde_json::to_value(CommentRequest { content: text })?;
                transport
                    .post(&format!("/posts/{}/comments", post_id), &body)
                    .await
            }
            Self::Flat => {
                let body = serde_json::to_value(FlatCommentRequest {
                    post_id,
                    content: text,
                })?;
                transport.post("/comments", &body).await
            }
        }
    }
}

/// Post `text` as a comment on `post_id`; true when any route is accepted
///
/// Never fails: rejected or unreachable routes are logged and the next one
/// is tried.
pub async fn publish_reply<T: MoltTransport + ?Sized>(transport: &T, post_id: &str, text: &str) -> bool {
    for route in ReplyRoute::ALL {
        match route.send(transport, post_id, text).await {
            Ok(response) if response.is_success() => {
                info!("Successfully commented on post {} via {:?}", post_id, route);
                return true;
            }
            Ok(response) => {
                warn!(
                    "{:?} comment on post {} rejected, status: {} ({})",
                    route,
                    post_id,
                    response.status,
                    response.snippet()
                );
            }
            Err(e) => {
                warn!("{:?} comment on post {} failed: {}", route, post_id, e);
            }
        }
    }

    error!("Failed to comment on post {}, all endpoints rejected it", post_id);
    false
}
