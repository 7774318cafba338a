use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::MovieMetadata;

/// Alert text shown when the draft is submitted incomplete.
pub const INCOMPLETE_DRAFT_MESSAGE: &str = "Please fill all fields and select files";

/// Body of `POST /upload-urls`: the original file names for which the API
/// issues two pre-signed upload destinations.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub video_file_name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub thumbnail_file_name: String,
}

/// Response of `POST /upload-urls`: one pre-signed destination and one
/// storage key per file. The keys are what `POST /movies` later references.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsResponse {
    pub video_upload_url: String,
    pub thumbnail_upload_url: String,
    pub video_key: String,
    pub thumbnail_key: String,
}

/// Transient form state for one upload. Created empty, filled from user
/// input, and cleared by [`UploadDraft::reset`] on success only; a failed
/// upload leaves the draft untouched so the user can retry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadDraft {
    pub title: String,
    pub genre: String,
    pub year: Option<i32>,
    pub video_path: Option<PathBuf>,
    pub thumbnail_path: Option<PathBuf>,
}

impl UploadDraft {
    /// Local validation, run before any request leaves the client: the title
    /// must be non-empty and both files selected and readable.
    pub fn validate(&self) -> Result<(), AppError> {
        let files_ok = [&self.video_path, &self.thumbnail_path]
            .into_iter()
            .all(|path| path.as_deref().is_some_and(|p| p.is_file()));

        if self.title.trim().is_empty() || !files_ok {
            return Err(AppError::InvalidInput(INCOMPLETE_DRAFT_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Clears every field back to its initial state. Called on successful
    /// upload only.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The original file names sent to the upload-URL endpoint.
    pub fn file_names(&self) -> Result<(String, String), AppError> {
        let name_of = |path: &Option<PathBuf>| {
            path.as_deref()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| AppError::InvalidInput(INCOMPLETE_DRAFT_MESSAGE.to_string()))
        };
        Ok((name_of(&self.video_path)?, name_of(&self.thumbnail_path)?))
    }

    /// Metadata for the create call. An empty genre is omitted rather than
    /// sent as an empty string.
    pub fn metadata(&self) -> MovieMetadata {
        MovieMetadata {
            genre: (!self.genre.trim().is_empty()).then(|| self.genre.clone()),
            year: self.year,
            extra: serde_json::Map::new(),
        }
    }
}

/// Which of the two transfers a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFile {
    Video,
    Thumbnail,
}

/// Phases of the sequential upload workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    RequestingUrls,
    Transferring,
    Committing,
    Done,
    Failed,
}

/// Side-channel notifications emitted while an upload runs: phase changes
/// and integer percent-complete updates per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    State(UploadState),
    Progress { file: UploadFile, percent: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use validator::Validate;

    fn draft_with_files(dir: &std::path::Path) -> UploadDraft {
        let video = dir.join("feature.mp4");
        let thumbnail = dir.join("poster.jpg");
        fs::write(&video, b"not really mp4").unwrap();
        fs::write(&thumbnail, b"not really jpeg").unwrap();

        UploadDraft {
            title: "Night Train".to_string(),
            genre: "thriller".to_string(),
            year: Some(2024),
            video_path: Some(video),
            thumbnail_path: Some(thumbnail),
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        let dir = tempfile::tempdir().unwrap();
        assert!(draft_with_files(dir.path()).validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut draft = draft_with_files(dir.path());
        draft.title = "   ".to_string();

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid input: {}", INCOMPLETE_DRAFT_MESSAGE)
        );
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut draft = draft_with_files(dir.path());
        draft.thumbnail_path = None;
        assert!(draft.validate().is_err());

        let mut draft = draft_with_files(dir.path());
        draft.video_path = Some(dir.path().join("does-not-exist.mp4"));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_file_names_come_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let draft = draft_with_files(dir.path());
        let (video, thumbnail) = draft.file_names().unwrap();
        assert_eq!(video, "feature.mp4");
        assert_eq!(thumbnail, "poster.jpg");
    }

    #[test]
    fn test_reset_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut draft = draft_with_files(dir.path());
        draft.reset();
        assert_eq!(draft, UploadDraft::default());
    }

    #[test]
    fn test_metadata_omits_blank_genre() {
        let dir = tempfile::tempdir().unwrap();
        let mut draft = draft_with_files(dir.path());
        draft.genre = String::new();
        draft.year = None;

        let metadata = draft.metadata();
        assert_eq!(metadata.genre, None);
        assert_eq!(metadata.year, None);
    }

    #[test]
    fn test_upload_urls_request_validates_names() {
        let request = UploadUrlsRequest {
            video_file_name: String::new(),
            thumbnail_file_name: "poster.jpg".to_string(),
        };
        assert!(request.validate().is_err());

        let request = UploadUrlsRequest {
            video_file_name: "feature.mp4".to_string(),
            thumbnail_file_name: "poster.jpg".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
