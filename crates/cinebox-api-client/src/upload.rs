//! Pre-signed storage transfers and the sequential upload workflow.
//!
//! The workflow runs RequestingUrls → Transferring → Committing and ends in
//! Done or Failed. The two file transfers run concurrently and are joined
//! before the metadata commit; the first failure rejects the join and the
//! other transfer's outcome is abandoned (its bytes may already be in
//! storage). There is no retry and no rollback of transferred files — a
//! failed commit leaves orphaned storage objects.

use std::path::Path;

use anyhow::{Context, Result};
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Body;
use tokio_util::io::ReaderStream;
use tracing::debug;

use cinebox_core::models::{
    CreateMovieRequest, UploadDraft, UploadEvent, UploadFile, UploadState, UploadUrlsRequest,
};

use crate::ApiClient;

impl ApiClient {
    /// Runs the whole upload workflow for `draft`, emitting state and
    /// progress events through `on_event`.
    ///
    /// The draft is validated before anything leaves the client; a
    /// validation failure returns without emitting any event. On success the
    /// draft resets to empty. On any later failure the draft is left
    /// untouched and the last event is `Failed`.
    pub async fn upload_movie<F>(&self, draft: &mut UploadDraft, on_event: F) -> Result<()>
    where
        F: Fn(UploadEvent) + Clone + Send + Sync + 'static,
    {
        draft.validate()?;

        let result = self.run_upload(draft, on_event.clone()).await;
        match &result {
            Ok(()) => {
                on_event(UploadEvent::State(UploadState::Done));
                draft.reset();
            }
            Err(error) => {
                debug!(error = %error, "upload workflow failed");
                on_event(UploadEvent::State(UploadState::Failed));
            }
        }
        result
    }

    async fn run_upload<F>(&self, draft: &UploadDraft, on_event: F) -> Result<()>
    where
        F: Fn(UploadEvent) + Clone + Send + Sync + 'static,
    {
        on_event(UploadEvent::State(UploadState::RequestingUrls));
        let (video_file_name, thumbnail_file_name) = draft.file_names()?;
        let urls = self
            .request_upload_urls(&UploadUrlsRequest {
                video_file_name,
                thumbnail_file_name,
            })
            .await?;

        // validate() ran before the workflow started; both paths are set.
        let video_path = draft
            .video_path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("video file missing from draft"))?;
        let thumbnail_path = draft
            .thumbnail_path
            .clone()
            .ok_or_else(|| anyhow::anyhow!("thumbnail file missing from draft"))?;

        on_event(UploadEvent::State(UploadState::Transferring));
        let video_events = on_event.clone();
        let thumbnail_events = on_event.clone();
        tokio::try_join!(
            self.put_file(&urls.video_upload_url, &video_path, move |percent| {
                video_events(UploadEvent::Progress {
                    file: UploadFile::Video,
                    percent,
                });
            }),
            self.put_file(&urls.thumbnail_upload_url, &thumbnail_path, move |percent| {
                thumbnail_events(UploadEvent::Progress {
                    file: UploadFile::Thumbnail,
                    percent,
                });
            }),
        )?;

        on_event(UploadEvent::State(UploadState::Committing));
        self.create_movie(&CreateMovieRequest {
            title: draft.title.clone(),
            video_url: urls.video_key,
            thumbnail_url: urls.thumbnail_key,
            metadata: draft.metadata(),
        })
        .await
    }

    /// Streams one file to its pre-signed destination with a raw-body PUT,
    /// reporting integer percent-complete after each chunk read.
    pub async fn put_file<P>(&self, url: &str, path: &Path, on_percent: P) -> Result<()>
    where
        P: Fn(u8) + Send + Sync + 'static,
    {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let total = file
            .metadata()
            .await
            .with_context(|| format!("Failed to read file metadata: {}", path.display()))?
            .len();
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        let mut sent: u64 = 0;
        let counted = ReaderStream::new(file).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                sent += bytes.len() as u64;
                on_percent(percent_of(sent, total));
            }
            chunk
        });

        let response = self
            .transfer_client
            .put(url)
            .header(CONTENT_TYPE, content_type.as_ref())
            .header(CONTENT_LENGTH, total)
            .body(Body::wrap_stream(counted))
            .send()
            .await
            .context("Failed to send file to storage")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Upload failed with status {}", status));
        }
        Ok(())
    }
}

fn percent_of(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((sent as f64 / total as f64) * 100.0).round().min(100.0) as u8
}
