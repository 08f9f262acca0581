// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::FeedConfig;

/// Create a configured asynchronous HTTP client.
///
/// One client serves both the feed and the destination API for a run.
pub fn create_async_client(config: &FeedConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Read a response body for an error message, keeping it short.
pub async fn error_body(response: reqwest::Response) -> String {
    const MAX_LEN: usize = 300;

    let text = response.text().await.unwrap_or_default();
    let text = text.trim();
    if text.chars().count() > MAX_LEN {
        let cut: String = text.chars().take(MAX_LEN).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
