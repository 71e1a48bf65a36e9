//! Per-cycle outcome summary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a single cycle achieved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// When the cycle started
    pub started_at: DateTime<Utc>,
    /// Whether a publish was attempted this cycle
    pub post_attempted: bool,
    /// Whether the new post was accepted
    pub post_published: bool,
    /// Id of the new post, when the provider reported one
    pub post_id: Option<String>,
    /// Whether `/agents/me` resolved to an identity
    pub identity_resolved: bool,
    /// Own posts walked during the engagement pass
    pub posts_scanned: usize,
    /// Comments fetched across all posts
    pub comments_seen: usize,
    /// Replies accepted by the provider
    pub replies_sent: usize,
    /// Replies rejected by every endpoint
    pub replies_failed: usize,
    /// No call in the cycle got an HTTP answer from the provider
    pub transport_failed: bool,
}

impl CycleReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            post_attempted: false,
            post_published: false,
            post_id: None,
            identity_resolved: false,
            posts_scanned: 0,
            comments_seen: 0,
            replies_sent: 0,
            replies_failed: 0,
            transport_failed: false,
        }
    }

    /// Whether at least one call got an HTTP answer, successful or not
    pub fn reached_provider(&self) -> bool {
        !self.transport_failed
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "post={} posts_scanned={} comments={} replies_sent={} replies_failed={}",
            match (self.post_attempted, self.post_published) {
                (false, _) => "skipped",
                (true, true) => "published",
                (true, false) => "failed",
            },
            self.posts_scanned,
            self.comments_seen,
            self.replies_sent,
            self.replies_failed
        )
    }
}

impl Default for CycleReport {
    fn default() -> Self {
        Self::new()
    }
}
