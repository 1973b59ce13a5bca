//! Helix API client.

use chrono::{DateTime, Utc};
use reel_models::{ClipRecord, SourcePool};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::{fetch_app_token, AppCredentials};
use crate::error::{TwitchError, TwitchResult};

/// Production OAuth token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://id.twitch.tv/oauth2/token";

/// Production Helix API base.
pub const DEFAULT_API_BASE: &str = "https://api.twitch.tv/helix";

/// What a clip query is keyed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipSource {
    /// `broadcaster_id` query
    Broadcaster(String),
    /// `game_id` query
    Game(String),
}

impl ClipSource {
    fn query_param(&self) -> (&'static str, &str) {
        match self {
            ClipSource::Broadcaster(id) => ("broadcaster_id", id),
            ClipSource::Game(id) => ("game_id", id),
        }
    }

    /// Which candidate pool clips from this source belong to.
    pub fn pool(&self) -> SourcePool {
        match self {
            ClipSource::Broadcaster(_) => SourcePool::Broadcaster,
            ClipSource::Game(_) => SourcePool::Category,
        }
    }
}

/// Parameters for one `GET /clips` call.
#[derive(Debug, Clone)]
pub struct ClipQuery {
    pub source: ClipSource,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Maximum clips returned for this source (Helix `first`, max 100).
    pub first: u32,
    /// ISO 639-1 language the pipeline keeps. The clips endpoint has no
    /// server-side language filter, so this is applied to the response.
    /// Empty string keeps every language.
    pub language: String,
}

/// Helix API wire format for one clip.
#[derive(Debug, Deserialize)]
struct HelixClip {
    id: String,
    url: String,
    embed_url: Option<String>,
    thumbnail_url: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    view_count: u64,
    #[serde(default)]
    broadcaster_id: String,
    #[serde(default)]
    broadcaster_name: String,
    game_name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    language: String,
}

impl HelixClip {
    fn into_record(self, source: SourcePool) -> ClipRecord {
        ClipRecord {
            id: self.id,
            url: self.url,
            embed_url: self.embed_url,
            thumbnail_url: self.thumbnail_url,
            title: self.title,
            view_count: self.view_count,
            broadcaster_id: self.broadcaster_id,
            broadcaster_name: self.broadcaster_name,
            game_name: self.game_name,
            created_at: self.created_at,
            duration: self.duration,
            language: self.language,
            source,
        }
    }
}

#[derive(Debug, Deserialize)]
struct HelixResponse<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
    #[serde(default)]
    login: String,
}

/// Client for the Helix endpoints the pipeline uses.
#[derive(Debug)]
pub struct HelixClient {
    http: reqwest::Client,
    credentials: AppCredentials,
    auth_url: String,
    api_base: String,
    token: Option<String>,
}

impl HelixClient {
    /// Create a client against the production endpoints.
    pub fn new(credentials: AppCredentials) -> Self {
        Self::with_endpoints(credentials, DEFAULT_AUTH_URL, DEFAULT_API_BASE)
    }

    /// Create a client against explicit endpoints (used by tests).
    pub fn with_endpoints(
        credentials: AppCredentials,
        auth_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            auth_url: auth_url.into(),
            api_base: api_base.into(),
            token: None,
        }
    }

    /// Obtain and cache an app access token.
    pub async fn authenticate(&mut self) -> TwitchResult<()> {
        let token = fetch_app_token(&self.http, &self.credentials, &self.auth_url).await?;
        self.token = Some(token);
        Ok(())
    }

    fn bearer(&self) -> TwitchResult<&str> {
        self.token.as_deref().ok_or(TwitchError::NotAuthenticated)
    }

    /// Fetch top clips for one source over a time window.
    ///
    /// Returns clips tagged with the source's pool, filtered to the query
    /// language. An empty response is an empty vec, not an error.
    pub async fn top_clips(&self, query: &ClipQuery) -> TwitchResult<Vec<ClipRecord>> {
        let token = self.bearer()?;
        let (source_key, source_id) = query.source.query_param();
        let first = query.first.to_string();
        let started_at = query.started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let ended_at = query.ended_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let response = self
            .http
            .get(format!("{}/clips", self.api_base))
            .header("Client-ID", &self.credentials.client_id)
            .bearer_auth(token)
            .query(&[
                ("first", first.as_str()),
                ("started_at", started_at.as_str()),
                ("ended_at", ended_at.as_str()),
                (source_key, source_id),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitchError::api(status.as_u16(), body));
        }

        let payload: HelixResponse<HelixClip> = response.json().await?;
        if payload.data.is_empty() {
            warn!(source = ?query.source, "No clips returned for source in the requested window");
            return Ok(Vec::new());
        }

        let pool = query.source.pool();
        let total = payload.data.len();
        let clips: Vec<ClipRecord> = payload
            .data
            .into_iter()
            .filter(|clip| query.language.is_empty() || clip.language == query.language)
            .map(|clip| clip.into_record(pool))
            .collect();

        debug!(
            source = ?query.source,
            fetched = total,
            kept = clips.len(),
            "Fetched clips for source"
        );
        Ok(clips)
    }

    /// Resolve a user login to its broadcaster id.
    pub async fn broadcaster_id(&self, login: &str) -> TwitchResult<Option<String>> {
        let token = self.bearer()?;

        let response = self
            .http
            .get(format!("{}/users", self.api_base))
            .header("Client-ID", &self.credentials.client_id)
            .bearer_auth(token)
            .query(&[("login", login)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwitchError::api(status.as_u16(), body));
        }

        let payload: HelixResponse<HelixUser> = response.json().await?;
        let user = payload.data.into_iter().next();
        if let Some(user) = &user {
            debug!(login = %user.login, id = %user.id, "Resolved broadcaster id");
        }
        Ok(user.map(|u| u.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> AppCredentials {
        AppCredentials {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
        }
    }

    fn clip_json(id: &str, language: &str, views: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "url": format!("https://clips.twitch.tv/{id}"),
            "embed_url": format!("https://clips.twitch.tv/embed?clip={id}"),
            "thumbnail_url": "https://clips-media.twitch.tv/thumb.jpg",
            "title": "Incroyable action",
            "view_count": views,
            "broadcaster_id": "42",
            "broadcaster_name": "streamer",
            "game_name": "VALORANT",
            "created_at": "2026-08-01T12:00:00Z",
            "duration": 28.5,
            "language": language
        })
    }

    async fn authenticated_client(server: &MockServer) -> HelixClient {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "app-token",
                "expires_in": 3600,
                "token_type": "bearer"
            })))
            .mount(server)
            .await;

        let mut client = HelixClient::with_endpoints(
            credentials(),
            format!("{}/oauth2/token", server.uri()),
            server.uri(),
        );
        client.authenticate().await.unwrap();
        client
    }

    #[tokio::test]
    async fn test_top_clips_maps_and_filters_language() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/clips"))
            .and(query_param("game_id", "509670"))
            .and(query_param("first", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [clip_json("fr1", "fr", 120), clip_json("en1", "en", 900)]
            })))
            .mount(&server)
            .await;

        let query = ClipQuery {
            source: ClipSource::Game("509670".to_string()),
            started_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            ended_at: Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap(),
            first: 50,
            language: "fr".to_string(),
        };
        let clips = client.top_clips(&query).await.unwrap();

        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].id, "fr1");
        assert_eq!(clips[0].source, SourcePool::Category);
        assert_eq!(clips[0].view_count, 120);
        assert!((clips[0].duration - 28.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_top_clips_empty_window_is_not_an_error() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/clips"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let query = ClipQuery {
            source: ClipSource::Broadcaster("42".to_string()),
            started_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            ended_at: Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap(),
            first: 50,
            language: "fr".to_string(),
        };
        assert!(client.top_clips(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_broadcaster_id_lookup() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("login", "somestreamer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "id": "123456", "login": "somestreamer" }]
            })))
            .mount(&server)
            .await;

        let id = client.broadcaster_id("somestreamer").await.unwrap();
        assert_eq!(id.as_deref(), Some("123456"));
    }

    #[tokio::test]
    async fn test_unauthenticated_client_errors() {
        let client = HelixClient::with_endpoints(credentials(), "http://unused", "http://unused");
        let query = ClipQuery {
            source: ClipSource::Broadcaster("42".to_string()),
            started_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            ended_at: Utc.with_ymd_and_hms(2026, 8, 4, 0, 0, 0).unwrap(),
            first: 50,
            language: String::new(),
        };
        assert!(matches!(
            client.top_clips(&query).await,
            Err(TwitchError::NotAuthenticated)
        ));
    }
}
