//! # molt-client
//!
//! Transport layer for the Moltbook API.
//!
//! - [`MoltTransport`]: the seam every provider call goes through
//! - [`HttpClient`]: reqwest implementation with bearer auth
//! - [`MockTransport`]: scripted responses for tests
//! - [`decode`]: tolerant decoding of the provider's varying response shapes
//!
//! Non-success statuses are returned as data, not errors. Only failures to
//! reach the provider at all surface as `MoltError::Transport`.

mod auth;
mod client;
pub mod decode;
mod mock;
mod register;
mod transport;
mod types;

pub use auth::check_auth;
pub use client::HttpClient;
pub use mock::{MockTransport, RecordedCall};
pub use register::register_agent;
pub use transport::{request_key, ApiResponse, MoltTransport};
pub use types::*;
