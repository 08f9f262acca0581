// src/services/feed.rs

//! Feed fetcher service.

use reqwest::Client;

use crate::error::{AppError, Result};
use crate::utils::http::error_body;

/// Service for retrieving the calendar feed.
pub struct FeedFetcher {
    client: Client,
    url: String,
}

impl FeedFetcher {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Download the raw ICS document.
    ///
    /// Transport failures and non-success statuses are both fetch errors.
    pub async fn fetch(&self) -> Result<String> {
        log::info!("Fetching calendar feed...");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::fetch(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(AppError::fetch(&self.url, format!("status {status}: {body}")));
        }

        let document = response
            .text()
            .await
            .map_err(|e| AppError::fetch(&self.url, e))?;
        log::debug!("Feed returned {} bytes", document.len());
        Ok(document)
    }
}
