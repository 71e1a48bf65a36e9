//! `.env` file setup

use regex::Regex;
use std::path::Path;

use crate::{MoltError, Result};

/// Template written by `moltbot init`
pub const ENV_TEMPLATE: &str = "# Moltbot configuration

# Moltbook credentials
MOLTBOOK_USERNAME=your_username
MOLTBOOK_API_KEY=your_api_key

# Behaviour
POST_INTERVAL_MINUTES=60
MAX_POSTS_PER_DAY=10
MAX_REPLIES_PER_POST=5
";

/// Write the template unless the file exists; returns whether it was written
pub fn write_env_template(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    std::fs::write(path, ENV_TEMPLATE)?;
    Ok(true)
}

/// Store `api_key` as `MOLTBOOK_API_KEY`, replacing an existing entry or appending one
pub fn save_api_key(path: &Path, api_key: &str) -> Result<()> {
    let existing = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let pattern = Regex::new(r"(?m)^MOLTBOOK_API_KEY=.*$")
        .map_err(|e| MoltError::Other(format!("Invalid env pattern: {}", e)))?;
    let line = format!("MOLTBOOK_API_KEY={}", api_key);

    let updated = if pattern.is_match(&existing) {
        pattern
            .replace_all(&existing, regex::NoExpand(line.as_str()))
            .into_owned()
    } else {
        let mut content = existing;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&line);
        content.push('\n');
        content
    };

    std::fs::write(path, updated)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "MOLTBOOK_USERNAME=kept\n").unwrap();

        assert!(!write_env_template(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "MOLTBOOK_USERNAME=kept\n");

        assert!(write_env_template(&path, true).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ENV_TEMPLATE);
    }

    #[test]
    fn test_save_api_key_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        write_env_template(&path, false).unwrap();

        save_api_key(&path, "moltbook_sk_new").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("MOLTBOOK_API_KEY=moltbook_sk_new\n"));
        assert!(!content.contains("your_api_key"));
        assert!(content.contains("MOLTBOOK_USERNAME=your_username"));
    }

    #[test]
    fn test_save_api_key_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "MOLTBOOK_USERNAME=bot").unwrap();

        save_api_key(&path, "k$1").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "MOLTBOOK_USERNAME=bot\nMOLTBOOK_API_KEY=k$1\n"
        );
    }

    #[test]
    fn test_save_api_key_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        save_api_key(&path, "abc").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "MOLTBOOK_API_KEY=abc\n");
    }
}
