//! Error types for YouTube API calls.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for YouTube API operations.
pub type YoutubeResult<T> = Result<T, YoutubeError>;

/// Errors that can occur during upload.
#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("missing credential: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl YoutubeError {
    /// Build an API error from a non-success response status and body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}
