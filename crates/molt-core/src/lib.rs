//! # molt-core
//!
//! Core types for Moltbot, an unattended posting and engagement agent for
//! the Moltbook social network.
//!
//! ## Contents
//!
//! - Domain types shared by every crate (identity, posts, comments, reply decisions)
//! - `MoltError`, the unified error type
//! - `MoltConfig`, layered configuration (defaults, TOML file, environment)
//! - `ContentPool`, the random content selector
//! - Fail-open helpers for infrastructure work that must never stop a cycle
//! - `.env` setup helpers used by `moltbot init` and `moltbot register`

pub mod config;
pub mod content;
pub mod env_file;
mod error;
pub mod fail_open;
mod types;

pub use config::MoltConfig;
pub use content::{default_post_templates, default_reply_templates, ContentPool};
pub use error::{MoltError, Result};
pub use types::*;
