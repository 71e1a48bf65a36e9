//! Authentication check against the Moltbook API
//!
//! The bearer token itself is installed by [`crate::HttpClient`]; this module
//! verifies that the provider accepts it and reports who we are.

use crate::decode::decode_identity;
use crate::transport::MoltTransport;
use molt_core::{AgentIdentity, MoltError, Result};
use tracing::info;

/// Verify the API key by fetching `/agents/me`
///
/// A non-success status is an [`MoltError::Auth`]; an unreachable provider is
/// a transport error. A success without an identity id is a decode error.
pub async fn check_auth<T: MoltTransport + ?Sized>(transport: &T) -> Result<AgentIdentity> {
    info!("Checking Moltbook API authentication...");

    let response = transport.get("/agents/me", &[]).await?;
    if !response.is_success() {
        return Err(MoltError::Auth(format!(
            "status {}: {}",
            response.status,
            response.snippet()
        )));
    }

    let identity = decode_identity(&response.json())
        .ok_or_else(|| MoltError::Decode("/agents/me returned no agent id".to_string()))?;

    info!("Authenticated as: {}", identity.display_name);
    Ok(identity)
}
