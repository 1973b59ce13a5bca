//! App-token authentication (client-credentials grant).

use serde::Deserialize;
use tracing::info;

use crate::error::{TwitchError, TwitchResult};

/// Twitch application credentials.
#[derive(Debug, Clone)]
pub struct AppCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl AppCredentials {
    /// Load credentials from `TWITCH_CLIENT_ID` / `TWITCH_CLIENT_SECRET`.
    pub fn from_env() -> TwitchResult<Self> {
        let client_id = std::env::var("TWITCH_CLIENT_ID")
            .map_err(|_| TwitchError::MissingCredentials("TWITCH_CLIENT_ID"))?;
        let client_secret = std::env::var("TWITCH_CLIENT_SECRET")
            .map_err(|_| TwitchError::MissingCredentials("TWITCH_CLIENT_SECRET"))?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Fetch an app access token from the OAuth token endpoint.
pub(crate) async fn fetch_app_token(
    http: &reqwest::Client,
    credentials: &AppCredentials,
    auth_url: &str,
) -> TwitchResult<String> {
    let response = http
        .post(auth_url)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TwitchError::api(status.as_u16(), body));
    }

    let token: TokenResponse = response.json().await?;
    info!("Obtained Twitch app access token");
    Ok(token.access_token)
}
