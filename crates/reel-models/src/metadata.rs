//! Video upload metadata.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// YouTube category id for Gaming.
pub const CATEGORY_GAMING: &str = "20";

/// Metadata for the compiled video, written to `video_metadata.json` by the
/// metadata stage and consumed by the upload stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    /// Video title (sanitized/truncated again at upload time)
    pub title: String,

    /// Full description including chapter markers
    pub description: String,

    /// Tag list
    #[serde(default)]
    pub tags: Vec<String>,

    /// YouTube category id
    #[serde(default = "default_category_id")]
    pub category_id: String,

    /// Privacy status: "public", "unlisted" or "private"
    #[serde(default = "default_privacy_status", rename = "privacyStatus")]
    pub privacy_status: String,
}

fn default_category_id() -> String {
    CATEGORY_GAMING.to_string()
}

fn default_privacy_status() -> String {
    "public".to_string()
}

impl VideoMetadata {
    /// Create metadata with the default category and privacy.
    pub fn new(title: impl Into<String>, description: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags,
            category_id: default_category_id(),
            privacy_status: default_privacy_status(),
        }
    }
}
