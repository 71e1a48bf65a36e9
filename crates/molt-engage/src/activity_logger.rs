//! Activity Logger - human-readable cycle log in markdown
//!
//! Appends one section per cycle with what was posted and answered, plus a
//! header whenever continuous mode starts. Every write is fail-open.

use crate::report::CycleReport;
use chrono::Utc;
use molt_core::fail_open::fail_open;
use molt_core::{AgentIdentity, Result};
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Activity logger for engagement cycles
#[derive(Debug, Clone)]
pub struct ActivityLogger {
    output_path: PathBuf,
}

impl ActivityLogger {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Log the start of a continuous run
    ///
    /// This operation is fail-open - logging failures won't stop the bot
    pub async fn log_session_start(&self, identity: &AgentIdentity, interval_minutes: u64) {
        fail_open("activity_logger::log_session_start", || async {
            let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
            let content = format!(
                "# Moltbot Activity Log\n\n**Agent**: {}\n**Started**: {}\n**Interval**: {} minutes\n\n---\n\n",
                identity, timestamp, interval_minutes
            );
            self.append_internal(&content).await
        })
        .await;
    }

    /// Log the outcome of one cycle
    ///
    /// This operation is fail-open - logging failures won't stop the bot
    pub async fn log_cycle(&self, report: &CycleReport) {
        fail_open("activity_logger::log_cycle", || async {
            let mut content = format!(
                "### Cycle {}\n\n",
                report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            );

            let post_line = match (report.post_attempted, report.post_published, &report.post_id) {
                (false, _, _) => "skipped (daily cap reached)".to_string(),
                (true, true, Some(id)) => format!("published ({})", id),
                (true, true, None) => "published".to_string(),
                (true, false, _) => "failed".to_string(),
            };
            content.push_str(&format!("**Post**: {}\n", post_line));
            content.push_str(&format!(
                "**Engagement**: {} posts scanned, {} comments seen\n",
                report.posts_scanned, report.comments_seen
            ));
            content.push_str(&format!(
                "**Replies**: {} sent, {} failed\n",
                report.replies_sent, report.replies_failed
            ));
            if !report.identity_resolved {
                content.push_str("**Warning**: agent identity could not be resolved\n");
            }
            content.push_str("\n---\n\n");

            self.append_internal(&content).await
        })
        .await;
    }

    /// Append content to the activity log (internal, returns Result for fail_open)
    async fn append_internal(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)
            .await?;

        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
