//! Own-posts resolution
//!
//! Resolves the agent's identity, then lists the posts it authored. The
//! listing endpoint differs between provider versions, so the known
//! conventions are tried in order until one answers with success.

use molt_client::decode::{decode_identity, decode_post_ids};
use molt_client::{ApiResponse, MoltTransport};
use molt_core::{AgentIdentity, Result};
use tracing::{debug, info, warn};

/// Endpoint conventions for listing an author's posts, in the order tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostListingRoute {
    /// `GET /posts?author_id={id}`
    AuthorQuery,
    /// `GET /agents/{id}/posts`
    AgentScoped,
}

impl PostListingRoute {
    pub const ALL: [PostListingRoute; 2] = [Self::AuthorQuery, Self::AgentScoped];

    async fn fetch<T: MoltTransport + ?Sized>(
        self,
        transport: &T,
        agent_id: &str,
    ) -> Result<ApiResponse> {
        match self {
            Self::AuthorQuery => transport.get("/posts", &[("author_id", agent_id)]).await,
            Self::AgentScoped => {
                transport
                    .get(&format!("/agents/{}/posts", agent_id), &[])
                    .await
            }
        }
    }
}

/// Identity and post ids discovered by one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnPosts {
    pub identity: Option<AgentIdentity>,
    pub post_ids: Vec<String>,
    /// `/agents/me` never got an HTTP answer
    pub transport_failed: bool,
}

/// Ids of the posts authored by the agent; empty when anything fails
pub async fn resolve_own_posts<T: MoltTransport + ?Sized>(transport: &T) -> Vec<String> {
    resolve_own_posts_detailed(transport).await.post_ids
}

/// Like [`resolve_own_posts`], also reporting whether the identity resolved
pub async fn resolve_own_posts_detailed<T: MoltTransport + ?Sized>(transport: &T) -> OwnPosts {
    let identity = match resolve_identity(transport).await {
        Ok(Some(identity)) => identity,
        Ok(None) => return OwnPosts::default(),
        Err(e) => {
            warn!("Failed to get agent info: {}", e);
            return OwnPosts {
                transport_failed: true,
                ..OwnPosts::default()
            };
        }
    };

    let post_ids = list_posts_by(transport, &identity.id).await;
    OwnPosts {
        identity: Some(identity),
        post_ids,
        transport_failed: false,
    }
}

/// `Ok(None)` when the provider answered without a usable identity;
/// `Err` only when it could not be reached
async fn resolve_identity<T: MoltTransport + ?Sized>(
    transport: &T,
) -> Result<Option<AgentIdentity>> {
    let response = transport.get("/agents/me", &[]).await?;
    if !response.is_success() {
        warn!(
            "Failed to get agent info, status: {} ({})",
            response.status,
            response.snippet()
        );
        return Ok(None);
    }

    let identity = decode_identity(&response.json());
    if identity.is_none() {
        warn!("Could not find agent id in /agents/me response");
    }
    Ok(identity)
}

async fn list_posts_by<T: MoltTransport + ?Sized>(transport: &T, agent_id: &str) -> Vec<String> {
    for route in PostListingRoute::ALL {
        match route.fetch(transport, agent_id).await {
            Ok(response) if response.is_success() => {
                let ids = decode_post_ids(response.json());
                info!("Found {} own posts via {:?}", ids.len(), route);
                return ids;
            }
            Ok(response) => {
                debug!("{:?} listing returned status {}", route, response.status);
            }
            Err(e) => {
                debug!("{:?} listing failed: {}", route, e);
            }
        }
    }

    warn!("Could not list posts for agent {}, tried all endpoints", agent_id);
    Vec::new()
}
