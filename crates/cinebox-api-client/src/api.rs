//! Domain methods for the Cinebox API client.
//!
//! Request and response types live in `cinebox_core::models`; this module
//! only ties them to endpoints.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;
use validator::Validate;

use cinebox_core::models::{CreateMovieRequest, Movie, UploadUrlsRequest, UploadUrlsResponse};

use crate::ApiClient;

impl ApiClient {
    /// Fetch the movie collection. A 2xx payload that is valid JSON but not
    /// an array deserializes to an empty list; the listing treats "nothing
    /// there" and "unexpected shape" the same way.
    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        let body: Value = self.get("/movies").await?;
        match body {
            Value::Array(_) => {
                serde_json::from_value(body).context("Failed to parse movie list")
            }
            other => {
                debug!(payload = %other, "movies endpoint returned a non-array payload");
                Ok(Vec::new())
            }
        }
    }

    /// Request two pre-signed upload destinations for the given file names.
    pub async fn request_upload_urls(
        &self,
        request: &UploadUrlsRequest,
    ) -> Result<UploadUrlsResponse> {
        request.validate().context("Invalid upload-URL request")?;
        self.post_json("/upload-urls", request).await
    }

    /// Register a new movie's metadata. The response body is not inspected;
    /// any non-2xx status is an error.
    pub async fn create_movie(&self, request: &CreateMovieRequest) -> Result<()> {
        self.post_json_discard("/movies", request).await
    }
}
