//! Error types for Twitch API calls.

use thiserror::Error;

/// Result type for Twitch API operations.
pub type TwitchResult<T> = Result<T, TwitchError>;

/// Errors that can occur talking to the Helix API.
#[derive(Debug, Error)]
pub enum TwitchError {
    #[error("missing credential: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("client is not authenticated; call authenticate() first")]
    NotAuthenticated,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twitch API returned {status}: {body}")]
    Api { status: u16, body: String },
}

impl TwitchError {
    /// Build an API error from a non-success response status and body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }
}
