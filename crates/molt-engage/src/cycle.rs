//! Cycle orchestration: publish one post, then answer comments on own posts
//!
//! Steps run strictly in sequence. A failure in one step is logged and the
//! cycle moves on: a rejected post never blocks engagement, and a post whose
//! comments cannot be fetched never blocks the next post.

use crate::activity_logger::ActivityLogger;
use crate::comments::fetch_comments;
use crate::own_posts::resolve_own_posts_detailed;
use crate::policy::ReplyPolicy;
use crate::publisher::publish_reply;
use crate::report::CycleReport;
use molt_client::decode::decode_created_post_id;
use molt_client::MoltTransport;
use molt_core::{
    default_post_templates, default_reply_templates, ContentPool, MoltConfig, MoltError, PostDraft,
    Result,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

/// One agent's posting and engagement cycle
pub struct EngagementCycle<T: MoltTransport> {
    transport: T,
    username: String,
    submolt: String,
    posts: ContentPool<String>,
    policy: ReplyPolicy,
    reply_delay: Duration,
    activity_logger: Option<ActivityLogger>,
}

impl<T: MoltTransport> EngagementCycle<T> {
    /// Create a cycle with explicit pools
    pub fn new(
        transport: T,
        username: impl Into<String>,
        posts: ContentPool<String>,
        policy: ReplyPolicy,
    ) -> Self {
        Self {
            transport,
            username: username.into(),
            submolt: molt_core::DEFAULT_SUBMOLT.to_string(),
            posts,
            policy,
            reply_delay: Duration::from_secs(2),
            activity_logger: None,
        }
    }

    /// Create a cycle from configuration; fails on a missing username or empty pool
    pub fn from_config(transport: T, config: &MoltConfig) -> Result<Self> {
        let username = config.require_username()?;
        let posts = ContentPool::new(
            config
                .post_templates
                .clone()
                .unwrap_or_else(default_post_templates),
        )
        .map_err(|e| MoltError::Config(format!("post_templates: {}", e)))?;
        let replies = ContentPool::new(
            config
                .reply_templates
                .clone()
                .unwrap_or_else(default_reply_templates),
        )
        .map_err(|e| MoltError::Config(format!("reply_templates: {}", e)))?;

        let mut cycle = Self::new(
            transport,
            username,
            posts,
            ReplyPolicy::new(config.max_replies_per_post, replies),
        )
        .with_submolt(config.submolt.clone())
        .with_reply_delay(config.reply_delay());

        if let Some(path) = &config.activity_log {
            cycle = cycle.with_activity_logging(path.clone());
        }
        Ok(cycle)
    }

    pub fn with_submolt(mut self, submolt: impl Into<String>) -> Self {
        self.submolt = submolt.into();
        self
    }

    /// Pause between successive replies within a cycle
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Append a summary of every cycle to `path`
    pub fn with_activity_logging(mut self, path: PathBuf) -> Self {
        self.activity_logger = Some(ActivityLogger::new(path));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn activity_logger(&self) -> Option<&ActivityLogger> {
        self.activity_logger.as_ref()
    }

    /// Publish one post, then run the engagement pass
    pub async fn run_cycle(&self) -> CycleReport {
        info!("Starting bot cycle...");
        let mut report = CycleReport::new();

        report.post_attempted = true;
        let mut post_unreachable = false;
        let body = self.posts.pick();
        match self.publish_post(body).await {
            Ok(post_id) => {
                info!("Content posted successfully!");
                report.post_published = true;
                report.post_id = post_id;
            }
            Err(e) => {
                post_unreachable = matches!(e, MoltError::Transport(_));
                info!(
                    "Could not post content ({}). Continuing to check comments.",
                    e
                );
            }
        }

        self.engage(&mut report).await;
        report.transport_failed &= post_unreachable;
        self.finish(report).await
    }

    /// Run only the engagement pass (no new post)
    pub async fn run_engagement_pass(&self) -> CycleReport {
        info!("Starting engagement-only cycle...");
        let mut report = CycleReport::new();
        self.engage(&mut report).await;
        self.finish(report).await
    }

    /// Pick a body from the post pool and publish it
    pub async fn publish_new_post(&self) -> Result<Option<String>> {
        self.publish_post(self.posts.pick()).await
    }

    /// Publish `body` to the configured submolt
    ///
    /// Returns the new post's id when the provider reports one.
    pub async fn publish_post(&self, body: &str) -> Result<Option<String>> {
        let draft = PostDraft::new(self.submolt.clone(), body);
        info!("Posting: {}...", draft.title.chars().take(50).collect::<String>());

        let payload = serde_json::to_value(&draft)?;
        let response = self.transport.post("/posts", &payload).await?;

        if !response.is_success() {
            error!(
                "Failed to post, status: {} ({})",
                response.status,
                response.snippet()
            );
            return Err(MoltError::Api {
                status: response.status,
                body: response.snippet(),
            });
        }

        let post_id = decode_created_post_id(&response.json());
        if let Some(id) = &post_id {
            info!("Posted with ID: {}", id);
        }
        Ok(post_id)
    }

    async fn engage(&self, report: &mut CycleReport) {
        info!("Checking for comments on my posts...");

        let own = resolve_own_posts_detailed(&self.transport).await;
        report.identity_resolved = own.identity.is_some();
        report.transport_failed = own.transport_failed;

        if own.post_ids.is_empty() {
            info!("No posts found or error retrieving posts");
            return;
        }

        let mut replied_once = false;
        for post_id in &own.post_ids {
            report.posts_scanned += 1;

            let comments = fetch_comments(&self.transport, post_id).await;
            if comments.is_empty() {
                continue;
            }
            info!("Found {} comments for post {}", comments.len(), post_id);
            report.comments_seen += comments.len();

            for decision in self.policy.select_replies_for(&comments, &self.username) {
                if replied_once && !self.reply_delay.is_zero() {
                    tokio::time::sleep(self.reply_delay).await;
                }
                replied_once = true;

                info!(
                    "Responding to comment {} on post {}",
                    decision.target_comment_id, post_id
                );
                if publish_reply(&self.transport, post_id, &decision.chosen_reply_text).await {
                    report.replies_sent += 1;
                } else {
                    report.replies_failed += 1;
                }
            }
        }
    }

    async fn finish(&self, report: CycleReport) -> CycleReport {
        info!("Cycle completed: {}", report.summary());
        if let Some(logger) = &self.activity_logger {
            logger.log_cycle(&report).await;
        }
        report
    }
}
