//! Clip metadata models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which fetch pool a candidate clip came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourcePool {
    /// Fetched for a specific broadcaster id.
    Broadcaster,
    /// Fetched for a game/category id.
    Category,
}

impl SourcePool {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePool::Broadcaster => "broadcaster",
            SourcePool::Category => "category",
        }
    }
}

/// A candidate clip as returned by the Twitch Helix clips endpoint.
///
/// Serialized as-is into `top_clips.json` between the fetch and download
/// stages, so field names match the artifact format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipRecord {
    /// Clip id, unique within a fetch session
    pub id: String,

    /// Public clip page URL (what yt-dlp downloads)
    pub url: String,

    /// Embeddable player URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,

    /// Thumbnail image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Clip title as set on Twitch
    pub title: String,

    /// View count at fetch time
    #[serde(default)]
    pub view_count: u64,

    /// Broadcaster (channel) id
    pub broadcaster_id: String,

    /// Broadcaster display name
    pub broadcaster_name: String,

    /// Game/category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,

    /// Clip creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Duration in seconds as reported by the API
    #[serde(default)]
    pub duration: f64,

    /// ISO 639-1 language code
    #[serde(default)]
    pub language: String,

    /// Which pool this clip was fetched from
    pub source: SourcePool,
}

impl ClipRecord {
    /// Whether this record may be admitted into a compilation.
    ///
    /// A record with an empty id or a non-positive duration is excluded
    /// from consideration rather than reported as an error.
    pub fn is_admissible(&self) -> bool {
        !self.id.is_empty() && self.duration > 0.0
    }
}

/// A clip that has been downloaded, normalized, and probed.
///
/// Serialized into `downloaded_clips.json` between the download stage and
/// the compile/thumbnail/metadata stages. `duration` is the real duration
/// of the processed file as reported by ffprobe, not the API-reported one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DownloadedClip {
    /// Clip id (same as the source `ClipRecord`)
    pub id: String,

    /// Path of the normalized mp4
    pub path: PathBuf,

    /// Probed duration of the processed file, seconds
    pub duration: f64,

    /// Clip title
    pub title: String,

    /// Broadcaster display name
    pub broadcaster_name: String,

    /// First frame of the processed clip, used for the thumbnail grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_frame_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, duration: f64) -> ClipRecord {
        ClipRecord {
            id: id.to_string(),
            url: format!("https://clips.twitch.tv/{id}"),
            embed_url: None,
            thumbnail_url: None,
            title: "title".to_string(),
            view_count: 10,
            broadcaster_id: "42".to_string(),
            broadcaster_name: "streamer".to_string(),
            game_name: None,
            created_at: None,
            duration,
            language: "fr".to_string(),
            source: SourcePool::Broadcaster,
        }
    }

    #[test]
    fn test_admissible() {
        assert!(record("abc", 12.5).is_admissible());
    }

    #[test]
    fn test_zero_duration_not_admissible() {
        assert!(!record("abc", 0.0).is_admissible());
        assert!(!record("abc", -1.0).is_admissible());
    }

    #[test]
    fn test_empty_id_not_admissible() {
        assert!(!record("", 12.5).is_admissible());
    }

    #[test]
    fn test_artifact_field_names() {
        // Downstream stages read these artifact keys, keep them stable.
        let json = serde_json::to_value(record("abc", 30.0)).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["view_count"], 10);
        assert_eq!(json["broadcaster_id"], "42");
        assert_eq!(json["source"], "broadcaster");
    }
}
