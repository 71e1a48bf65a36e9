//! Continuous-run driver
//!
//! Gates on an authentication check, then repeats cycles on a fixed
//! interval. The daily post cap turns cycles into engagement-only passes
//! once exhausted. When no call in the cycle got an HTTP answer, the driver
//! waits the shorter backoff and retries instead of the full interval.
//! Rejections (401, 429, 5xx) wait the full interval. Shutdown is cooperative: the caller passes a future (Ctrl-C in
//! the binary) that ends the run at the next await point.

use crate::budget::DailyPostBudget;
use crate::cycle::EngagementCycle;
use crate::report::CycleReport;
use molt_client::{check_auth, MoltTransport};
use molt_core::{MoltConfig, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Repeats engagement cycles until shut down
pub struct Driver<T: MoltTransport> {
    cycle: EngagementCycle<T>,
    budget: DailyPostBudget,
    interval: Duration,
    retry_backoff: Duration,
}

impl<T: MoltTransport> Driver<T> {
    pub fn new(cycle: EngagementCycle<T>, config: &MoltConfig) -> Self {
        Self {
            cycle,
            budget: DailyPostBudget::new(config.max_posts_per_day),
            interval: config.poll_interval(),
            retry_backoff: config.retry_backoff(),
        }
    }

    /// Override the interval between cycles
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn cycle(&self) -> &EngagementCycle<T> {
        &self.cycle
    }

    /// Run one cycle, respecting the daily post cap
    pub async fn run_once(&mut self) -> CycleReport {
        if self.budget.has_capacity() {
            let report = self.cycle.run_cycle().await;
            if report.post_published {
                self.budget.record_post();
            }
            info!("{} posts left in today's budget", self.budget.remaining());
            report
        } else {
            info!("Daily post cap reached, skipping new post this cycle");
            self.cycle.run_engagement_pass().await
        }
    }

    /// How long to wait after a cycle with this outcome
    pub fn wait_after(&self, report: &CycleReport) -> Duration {
        if report.reached_provider() {
            self.interval
        } else {
            self.retry_backoff
        }
    }

    /// Run cycles until `shutdown` resolves
    ///
    /// Fails only when the initial authentication check fails.
    pub async fn run_continuous<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!(
            "Running continuous bot with {}-minute intervals...",
            self.interval.as_secs() / 60
        );

        let identity = check_auth(self.cycle.transport()).await?;
        if let Some(logger) = self.cycle.activity_logger() {
            logger
                .log_session_start(&identity, self.interval.as_secs() / 60)
                .await;
        }

        tokio::pin!(shutdown);
        loop {
            let report = tokio::select! {
                report = self.run_once() => report,
                _ = &mut shutdown => {
                    info!("Bot stopped by user during cycle");
                    return Ok(());
                }
            };

            let wait = self.wait_after(&report);
            if report.reached_provider() {
                info!("Waiting {} minutes for next cycle...", wait.as_secs() / 60);
            } else {
                warn!(
                    "Could not reach the provider this cycle, retrying in {} seconds",
                    wait.as_secs()
                );
            }

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = &mut shutdown => {
                    info!("Bot stopped by user");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ReplyPolicy;
    use molt_client::MockTransport;
    use molt_core::{ContentPool, MoltError};
    use serde_json::json;

    fn driver(mock: &MockTransport, max_posts_per_day: u32) -> Driver<MockTransport> {
        let posts = ContentPool::new(vec!["a post".to_string()]).unwrap();
        let replies = ContentPool::new(vec!["a reply".to_string()]).unwrap();
        let cycle = EngagementCycle::new(mock.clone(), "moltbot", posts, ReplyPolicy::new(5, replies))
            .with_reply_delay(Duration::ZERO);
        let config = MoltConfig {
            max_posts_per_day,
            ..MoltConfig::default()
        };
        Driver::new(cycle, &config)
    }

    fn healthy_provider() -> MockTransport {
        MockTransport::new()
            .with_json("GET /agents/me", 200, json!({"agent": {"id": "42", "name": "moltbot"}}))
            .with_json("POST /posts", 201, json!({"id": "p1"}))
            .with_json("GET /posts?author_id=42", 200, json!([]))
    }

    #[tokio::test]
    async fn test_daily_cap_switches_to_engagement_only() {
        let mock = healthy_provider();
        let mut driver = driver(&mock, 1);

        let first = driver.run_once().await;
        assert!(first.post_published);

        let second = driver.run_once().await;
        assert!(!second.post_attempted);
        assert!(second.identity_resolved);
        assert_eq!(mock.posted_to("/posts").len(), 1);
    }

    #[tokio::test]
    async fn test_failed_post_does_not_consume_budget() {
        let mock = MockTransport::new().with_status("POST /posts", 500);
        let mut driver = driver(&mock, 1);

        driver.run_once().await;
        driver.run_once().await;
        assert_eq!(mock.posted_to("/posts").len(), 2);
    }

    #[tokio::test]
    async fn test_backoff_when_provider_unreachable() {
        let mock = MockTransport::new();
        let mut driver = driver(&mock, 10)
            .with_interval(Duration::from_secs(3600))
            .with_retry_backoff(Duration::from_secs(60));

        let report = driver.run_once().await;
        assert_eq!(driver.wait_after(&report), Duration::from_secs(60));

        let reachable = CycleReport::new();
        assert_eq!(driver.wait_after(&reachable), Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_rejections_wait_full_interval() {
        let mock = MockTransport::new()
            .with_status("GET /agents/me", 429)
            .with_status("POST /posts", 429);
        let mut driver = driver(&mock, 10)
            .with_interval(Duration::from_secs(3600))
            .with_retry_backoff(Duration::from_secs(60));

        let report = driver.run_once().await;
        assert!(!report.post_published);
        assert!(!report.identity_resolved);
        assert_eq!(driver.wait_after(&report), Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_backoff_only_when_nothing_answered() {
        let mock = MockTransport::new().with_json("POST /posts", 201, json!({"id": "p1"}));
        let mut driver = driver(&mock, 1)
            .with_interval(Duration::from_secs(3600))
            .with_retry_backoff(Duration::from_secs(60));

        let first = driver.run_once().await;
        assert!(first.post_published);
        assert!(!first.identity_resolved);
        assert_eq!(driver.wait_after(&first), Duration::from_secs(3600));

        let second = driver.run_once().await;
        assert!(!second.post_attempted);
        assert_eq!(driver.wait_after(&second), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_continuous_gated_on_auth() {
        let mock = MockTransport::new().with_status("GET /agents/me", 401);
        let mut driver = driver(&mock, 10);

        let result = driver.run_continuous(std::future::pending()).await;
        assert!(matches!(result, Err(MoltError::Auth(_))));
        assert!(mock.posted_to("/posts").is_empty());
    }

    #[tokio::test]
    async fn test_continuous_stops_on_shutdown() {
        let mock = healthy_provider();
        let mut driver = driver(&mock, 10).with_interval(Duration::from_secs(3600));

        let shutdown = tokio::time::sleep(Duration::from_millis(50));
        driver.run_continuous(shutdown).await.unwrap();

        assert_eq!(mock.posted_to("/posts").len(), 1);
    }
}
