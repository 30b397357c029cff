//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout and user agent.
//! Proxies come from the standard HTTP_PROXY / HTTPS_PROXY / NO_PROXY variables,
//! which reqwest reads on its own.

use crate::error::AppError;
use reqwest::Client;
use std::time::Duration;

/// Build a reqwest Client with the given timeout and user agent.
///
/// Reddit rejects generic agents, so an empty value falls back to the crate name.
pub fn client_with_timeout(timeout: Duration, user_agent: &str) -> Result<Client, AppError> {
    let agent = if user_agent.trim().is_empty() {
        concat!("reddit-mcp/", env!("CARGO_PKG_VERSION"))
    } else {
        user_agent
    };

    Client::builder()
        .timeout(timeout)
        .user_agent(agent)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}
