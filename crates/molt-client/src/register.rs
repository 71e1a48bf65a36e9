//! One-shot agent registration

use crate::transport::MoltTransport;
use crate::types::{RegisterRequest, RegisterResponse, Registration};
use molt_core::{MoltError, Result};
use tracing::info;

/// Register a new agent and return its credentials
///
/// Use an unauthenticated transport; the provider issues the API key here.
/// The agent still has to be claimed by a human before it may post.
pub async fn register_agent<T: MoltTransport + ?Sized>(
    transport: &T,
    name: &str,
    description: &str,
) -> Result<Registration> {
    if name.trim().is_empty() {
        return Err(MoltError::Registration("agent name cannot be empty".to_string()));
    }
    if description.trim().is_empty() {
        return Err(MoltError::Registration("description cannot be empty".to_string()));
    }

    info!("Registering agent '{}'", name);
    let request = serde_json::to_value(RegisterRequest { name, description })?;
    let response = transport.post("/agents/register", &request).await?;

    if !response.is_success() {
        return Err(MoltError::Api {
            status: response.status,
            body: response.snippet(),
        });
    }

    let parsed: RegisterResponse = serde_json::from_str(&response.body)?;
    if !parsed.success {
        return Err(MoltError::Registration(
            parsed.error.unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    parsed
        .agent
        .ok_or_else(|| MoltError::Registration("response carried no agent credentials".to_string()))
}
