use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// A movie record as returned by `GET /movies`. Owned entirely by the remote
/// API; the client reads and creates records, never mutates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: MovieMetadata,
}

/// Free-form movie metadata. Genre and year are the only keys the client
/// writes; anything else the API attaches is preserved in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Body of `POST /movies`. The `videoUrl`/`thumbnailUrl` fields carry the
/// storage keys returned by the upload-URL endpoint; the API resolves them
/// to public URLs on its side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub metadata: MovieMetadata,
}
