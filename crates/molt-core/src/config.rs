//! Configuration management for Moltbot
//!
//! Configuration is resolved in layers:
//! 1. Built-in defaults
//! 2. An optional TOML file (`.moltbot/config.toml` unless another path is given)
//! 3. Environment variables (the binary loads `.env` first)
//!
//! The resolved snapshot is read-only for the rest of the process.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::DEFAULT_SUBMOLT;
use crate::{MoltError, Result};

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".moltbot/config.toml";

/// Upper bound for `post_interval_minutes` (one year)
pub const MAX_POST_INTERVAL_MINUTES: u64 = 365 * 24 * 60;

/// Resolved Moltbot configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct MoltConfig {
    /// API base URL, including the version prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// The agent's username; comments by this author are never answered
    #[serde(default)]
    pub username: Option<String>,

    /// Bearer token. Only ever read from the environment.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Minutes between cycles in continuous mode
    #[serde(default = "default_post_interval_minutes")]
    pub post_interval_minutes: u64,

    /// Posts published per UTC day before cycles switch to engagement only
    #[serde(default = "default_max_posts_per_day")]
    pub max_posts_per_day: u32,

    /// Comments considered per post per cycle
    #[serde(default = "default_max_replies_per_post")]
    pub max_replies_per_post: usize,

    /// Channel new posts are published to
    #[serde(default = "default_submolt")]
    pub submolt: String,

    /// Pause after each reply, in seconds
    #[serde(default = "default_reply_delay_secs")]
    pub reply_delay_secs: u64,

    /// Wait before retrying a cycle that could not reach the provider
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,

    /// Markdown activity log, appended once per cycle
    #[serde(default)]
    pub activity_log: Option<PathBuf>,

    /// Override for the built-in post bodies
    #[serde(default)]
    pub post_templates: Option<Vec<String>>,

    /// Override for the built-in reply bodies
    #[serde(default)]
    pub reply_templates: Option<Vec<String>>,
}

// Default value providers
fn default_base_url() -> String {
    "https://www.moltbook.com/api/v1".to_string()
}

fn default_post_interval_minutes() -> u64 {
    60
}

fn default_max_posts_per_day() -> u32 {
    10
}

fn default_max_replies_per_post() -> usize {
    5
}

fn default_submolt() -> String {
    DEFAULT_SUBMOLT.to_string()
}

fn default_reply_delay_secs() -> u64 {
    2
}

fn default_retry_backoff_secs() -> u64 {
    60
}

impl MoltConfig {
    /// Resolve configuration from defaults, the config file and the process environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default(Path::new("."))?,
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load `.moltbot/config.toml` under `root`, or use defaults when absent
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(DEFAULT_CONFIG_PATH);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            MoltError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default configuration to `.moltbot/config.toml` under `root`
    pub fn write_default(root: &Path) -> Result<PathBuf> {
        let config_path = root.join(DEFAULT_CONFIG_PATH);
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| MoltError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// Overlay environment variables using `lookup`
    ///
    /// Unset variables leave the current value alone; unparseable numbers are errors.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("MOLTBOOK_BASE_URL") {
            self.base_url = url;
        }
        if let Some(username) = get("MOLTBOOK_USERNAME") {
            self.username = Some(username);
        }
        if let Some(key) = get("MOLTBOOK_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(submolt) = get("MOLTBOOK_SUBMOLT") {
            self.submolt = submolt;
        }
        if let Some(path) = get("LOG_FILE") {
            self.activity_log = Some(PathBuf::from(path));
        }
        if let Some(v) = get("POST_INTERVAL_MINUTES") {
            self.post_interval_minutes = parse_number("POST_INTERVAL_MINUTES", &v)?;
        }
        if let Some(v) = get("MAX_POSTS_PER_DAY") {
            self.max_posts_per_day = parse_number("MAX_POSTS_PER_DAY", &v)?;
        }
        if let Some(v) = get("MAX_REPLIES_PER_POST") {
            self.max_replies_per_post = parse_number("MAX_REPLIES_PER_POST", &v)?;
        }
        if let Some(v) = get("REPLY_DELAY_SECS") {
            self.reply_delay_secs = parse_number("REPLY_DELAY_SECS", &v)?;
        }
        if let Some(v) = get("RETRY_BACKOFF_SECS") {
            self.retry_backoff_secs = parse_number("RETRY_BACKOFF_SECS", &v)?;
        }
        self.validate()
    }

    /// Reject values that would make the run loop spin or overflow
    pub fn validate(&self) -> Result<()> {
        if self.post_interval_minutes == 0 {
            return Err(MoltError::Config(
                "post_interval_minutes must be at least 1".to_string(),
            ));
        }
        if self.post_interval_minutes > MAX_POST_INTERVAL_MINUTES {
            return Err(MoltError::Config(format!(
                "post_interval_minutes must be at most {}, got {}",
                MAX_POST_INTERVAL_MINUTES, self.post_interval_minutes
            )));
        }
        Ok(())
    }

    /// The bearer token, or an auth error naming the variable to set
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            MoltError::Auth(
                "No API key found. Set MOLTBOOK_API_KEY (run `moltbot register` to obtain one)"
                    .to_string(),
            )
        })
    }

    /// The agent username, required for self-reply exclusion
    pub fn require_username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .ok_or_else(|| MoltError::Config("MOLTBOOK_USERNAME is not set".to_string()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.post_interval_minutes.saturating_mul(60))
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_secs(self.reply_delay_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MoltError::Config(format!("{} must be a number, got {:?}", key, value)))
}

impl Default for MoltConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            api_key: None,
            post_interval_minutes: default_post_interval_minutes(),
            max_posts_per_day: default_max_posts_per_day(),
            max_replies_per_post: default_max_replies_per_post(),
            submolt: default_submolt(),
            reply_delay_secs: default_reply_delay_secs(),
            retry_backoff_secs: default_retry_backoff_secs(),
            activity_log: None,
            post_templates: None,
            reply_templates: None,
        }
    }
}

impl std::fmt::Debug for MoltConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoltConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("post_interval_minutes", &self.post_interval_minutes)
            .field("max_posts_per_day", &self.max_posts_per_day)
            .field("max_replies_per_post", &self.max_replies_per_post)
            .field("submolt", &self.submolt)
            .field("reply_delay_secs", &self.reply_delay_secs)
            .field("retry_backoff_secs", &self.retry_backoff_secs)
            .field("activity_log", &self.activity_log)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MoltConfig::default();
        assert_eq!(config.base_url, "https://www.moltbook.com/api/v1");
        assert_eq!(config.post_interval_minutes, 60);
        assert_eq!(config.max_posts_per_day, 10);
        assert_eq!(config.max_replies_per_post, 5);
        assert_eq!(config.submolt, "general");
        assert_eq!(config.reply_delay(), Duration::from_secs(2));
        assert_eq!(config.retry_backoff(), Duration::from_secs(60));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MoltConfig::default();
        config
            .apply_env(lookup(&[
                ("MOLTBOOK_BASE_URL", "http://localhost:8080"),
                ("MOLTBOOK_USERNAME", "moltbot"),
                ("MOLTBOOK_API_KEY", "moltbook_sk_test"),
                ("POST_INTERVAL_MINUTES", "15"),
                ("MAX_POSTS_PER_DAY", "3"),
            ]))
            .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.require_username().unwrap(), "moltbot");
        assert_eq!(config.require_api_key().unwrap(), "moltbook_sk_test");
        assert_eq!(config.poll_interval(), Duration::from_secs(900));
        assert_eq!(config.max_posts_per_day, 3);
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let mut config = MoltConfig::default();
        config
            .apply_env(lookup(&[("MOLTBOOK_BASE_URL", "  "), ("MAX_POSTS_PER_DAY", "")]))
            .unwrap();
        assert_eq!(config.base_url, default_base_url());
        assert_eq!(config.max_posts_per_day, 10);
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let mut config = MoltConfig::default();
        let result = config.apply_env(lookup(&[("POST_INTERVAL_MINUTES", "hourly")]));
        assert!(matches!(result, Err(MoltError::Config(_))));
    }

    #[test]
    fn test_interval_bounds() {
        let mut config = MoltConfig::default();
        let zero = config.apply_env(lookup(&[("POST_INTERVAL_MINUTES", "0")]));
        assert!(matches!(zero, Err(MoltError::Config(_))));

        let mut config = MoltConfig::default();
        let huge = config.apply_env(lookup(&[("POST_INTERVAL_MINUTES", "18446744073709551615")]));
        assert!(matches!(huge, Err(MoltError::Config(_))));

        let mut config = MoltConfig::default();
        let max = MAX_POST_INTERVAL_MINUTES.to_string();
        config
            .apply_env(lookup(&[("POST_INTERVAL_MINUTES", max.as_str())]))
            .unwrap();
        assert_eq!(
            config.poll_interval(),
            Duration::from_secs(MAX_POST_INTERVAL_MINUTES * 60)
        );
    }

    #[test]
    fn test_poll_interval_saturates() {
        let config = MoltConfig {
            post_interval_minutes: u64::MAX,
            ..MoltConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_zero_interval_in_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zero.toml");
        std::fs::write(&path, "post_interval_minutes = 0\n").unwrap();
        assert!(matches!(
            MoltConfig::from_file(&path),
            Err(MoltError::Config(_))
        ));
    }

    #[test]
    fn test_missing_credentials() {
        let config = MoltConfig::default();
        assert!(matches!(config.require_api_key(), Err(MoltError::Auth(_))));
        assert!(matches!(config.require_username(), Err(MoltError::Config(_))));
    }

    #[test]
    fn test_write_and_load_default() {
        let dir = TempDir::new().unwrap();
        let path = MoltConfig::write_default(dir.path()).unwrap();
        assert!(path.exists());

        let loaded = MoltConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.max_replies_per_post, 5);
        assert_eq!(loaded.base_url, default_base_url());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "username = \"moltbot\"\nmax_replies_per_post = 2\nreply_templates = [\"thanks!\"]\n",
        )
        .unwrap();

        let config = MoltConfig::from_file(&path).unwrap();
        assert_eq!(config.username.as_deref(), Some("moltbot"));
        assert_eq!(config.max_replies_per_post, 2);
        assert_eq!(config.post_interval_minutes, 60);
        assert_eq!(config.reply_templates, Some(vec!["thanks!".to_string()]));
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = MoltConfig {
            api_key: Some("secret".to_string()),
            ..MoltConfig::default()
        };
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(!rendered.contains("secret"));
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
