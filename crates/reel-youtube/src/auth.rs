//! Refresh-token authentication against the Google OAuth endpoint.

use serde::Deserialize;
use tracing::info;

use crate::error::{YoutubeError, YoutubeResult};

/// Long-lived upload credentials: OAuth client plus a refresh token issued
/// for the `youtube.upload` scope.
#[derive(Debug, Clone)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl RefreshCredentials {
    /// Load credentials from `YOUTUBE_CLIENT_ID` / `YOUTUBE_CLIENT_SECRET`
    /// / `YOUTUBE_REFRESH_TOKEN`.
    pub fn from_env() -> YoutubeResult<Self> {
        let client_id = std::env::var("YOUTUBE_CLIENT_ID")
            .map_err(|_| YoutubeError::MissingCredentials("YOUTUBE_CLIENT_ID"))?;
        let client_secret = std::env::var("YOUTUBE_CLIENT_SECRET")
            .map_err(|_| YoutubeError::MissingCredentials("YOUTUBE_CLIENT_SECRET"))?;
        let refresh_token = std::env::var("YOUTUBE_REFRESH_TOKEN")
            .map_err(|_| YoutubeError::MissingCredentials("YOUTUBE_REFRESH_TOKEN"))?;
        Ok(Self {
            client_id,
            client_secret,
            refresh_token,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the refresh token for a short-lived access token.
pub(crate) async fn fetch_access_token(
    http: &reqwest::Client,
    credentials: &RefreshCredentials,
    token_url: &str,
) -> YoutubeResult<String> {
    let response = http
        .post(token_url)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(YoutubeError::api(status.as_u16(), body));
    }

    let token: TokenResponse = response.json().await?;
    info!("Refreshed YouTube access token");
    Ok(token.access_token)
}
