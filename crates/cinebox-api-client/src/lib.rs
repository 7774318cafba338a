//! Shared HTTP client for the Cinebox movies API.
//!
//! Provides a minimal client with generic GET/POST helpers, the domain
//! methods (list movies, request upload URLs, create a movie), and the
//! pre-signed upload workflow. The CLI crate uses this client directly.

pub mod api;
pub mod upload;

use anyhow::{Context, Result};
use cinebox_core::Config;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the movies API. The API itself carries no request
/// authentication; access is gated client-side by the session store.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    transfer_client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        // Pre-signed PUTs stream media of arbitrary size; those requests get
        // a client without a total-request timeout.
        let transfer_client = Client::builder()
            .build()
            .context("Failed to create transfer client")?;

        Ok(Self {
            client,
            transfer_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client pointed at the configured API base URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request. Deserializes the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// POST JSON body and deserialize the response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// POST JSON body, discarding the response body. Returns Ok(()) on any
    /// 2xx status.
    pub async fn post_json_discard<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "API request failed with status {}: {}",
                status,
                error_text
            ));
        }

        Ok(())
    }

    /// Raw client for requests outside the API base URL.
    pub fn transfer_client(&self) -> &Client {
        &self.transfer_client
    }
}

// Re-export domain types for convenience.
pub use cinebox_core::models::{
    CreateMovieRequest, Movie, MovieMetadata, UploadDraft, UploadEvent, UploadFile, UploadState,
    UploadUrlsRequest, UploadUrlsResponse,
};
