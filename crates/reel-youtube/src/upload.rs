//! Video and thumbnail upload.

use reel_models::VideoMetadata;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{info, warn};

use crate::auth::{fetch_access_token, RefreshCredentials};
use crate::error::{YoutubeError, YoutubeResult};

/// Production OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Production upload API base.
pub const DEFAULT_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/youtube/v3";

#[derive(Debug, serde::Deserialize)]
struct InsertResponse {
    id: String,
}

/// Client for the YouTube upload endpoints.
#[derive(Debug)]
pub struct YoutubeClient {
    http: reqwest::Client,
    credentials: RefreshCredentials,
    token_url: String,
    upload_base: String,
    token: Option<String>,
}

impl YoutubeClient {
    /// Create a client against the production endpoints.
    pub fn new(credentials: RefreshCredentials) -> Self {
        Self::with_endpoints(credentials, DEFAULT_TOKEN_URL, DEFAULT_UPLOAD_BASE)
    }

    /// Create a client against explicit endpoints (used by tests).
    pub fn with_endpoints(
        credentials: RefreshCredentials,
        token_url: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            token_url: token_url.into(),
            upload_base: upload_base.into(),
            token: None,
        }
    }

    /// Exchange the refresh token for an access token and cache it.
    pub async fn authenticate(&mut self) -> YoutubeResult<()> {
        let token = fetch_access_token(&self.http, &self.credentials, &self.token_url).await?;
        self.token = Some(token);
        Ok(())
    }

    fn bearer(&self) -> YoutubeResult<&str> {
        self.token
            .as_deref()
            .ok_or(YoutubeError::MissingCredentials("access token"))
    }

    /// Upload a video with its metadata. Returns the new video id.
    pub async fn upload_video(
        &self,
        video_path: impl AsRef<Path>,
        metadata: &VideoMetadata,
    ) -> YoutubeResult<String> {
        let video_path = video_path.as_ref();
        if !video_path.exists() {
            return Err(YoutubeError::FileNotFound(video_path.to_path_buf()));
        }
        let token = self.bearer()?;

        let body = serde_json::json!({
            "snippet": {
                "title": metadata.title,
                "description": metadata.description,
                "tags": metadata.tags,
                "categoryId": metadata.category_id,
            },
            "status": {
                "privacyStatus": metadata.privacy_status,
                "selfDeclaredMadeForKids": false,
            },
        });

        let video_bytes = tokio::fs::read(video_path).await?;
        let size_mb = video_bytes.len() as f64 / (1024.0 * 1024.0);
        info!(title = %metadata.title, size_mb, "Uploading video");

        let form = Form::new()
            .part(
                "metadata",
                Part::text(body.to_string())
                    .mime_str("application/json")
                    .expect("static mime type"),
            )
            .part(
                "video",
                Part::bytes(video_bytes)
                    .mime_str("video/mp4")
                    .expect("static mime type"),
            );

        let response = self
            .http
            .post(format!("{}/videos", self.upload_base))
            .bearer_auth(token)
            .query(&[("uploadType", "multipart"), ("part", "snippet,status")])
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YoutubeError::api(status.as_u16(), body));
        }

        let inserted: InsertResponse = response.json().await?;
        info!(
            video_id = %inserted.id,
            url = %format!("https://www.youtube.com/watch?v={}", inserted.id),
            "Video uploaded"
        );
        Ok(inserted.id)
    }

    /// Set the custom thumbnail of an uploaded video.
    ///
    /// Failing to set a thumbnail leaves the auto-generated one; callers
    /// treat this as non-fatal.
    pub async fn set_thumbnail(
        &self,
        video_id: &str,
        thumbnail_path: impl AsRef<Path>,
    ) -> YoutubeResult<()> {
        let thumbnail_path = thumbnail_path.as_ref();
        if !thumbnail_path.exists() {
            return Err(YoutubeError::FileNotFound(thumbnail_path.to_path_buf()));
        }
        let token = self.bearer()?;

        let bytes = tokio::fs::read(thumbnail_path).await?;
        let response = self
            .http
            .post(format!("{}/thumbnails/set", self.upload_base))
            .bearer_auth(token)
            .query(&[("videoId", video_id)])
            .header("Content-Type", "image/jpeg")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(video_id = %video_id, status = status.as_u16(), "Thumbnail upload rejected");
            return Err(YoutubeError::api(status.as_u16(), body));
        }

        info!(video_id = %video_id, "Thumbnail set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> RefreshCredentials {
        RefreshCredentials {
            client_id: "cid".to_string(),
            client_secret: "secret".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    async fn authenticated_client(server: &MockServer) -> YoutubeClient {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "yt-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .mount(server)
            .await;

        let mut client = YoutubeClient::with_endpoints(
            credentials(),
            format!("{}/token", server.uri()),
            server.uri(),
        );
        client.authenticate().await.unwrap();
        client
    }

    #[tokio::test]
    async fn test_upload_video_returns_id() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/videos"))
            .and(query_param("uploadType", "multipart"))
            .and(query_param("part", "snippet,status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "id": "vid123" })),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("compiled_video.mp4");
        std::fs::write(&video, b"not really a video").unwrap();

        let metadata = VideoMetadata::new("Titre", "Description", vec!["Twitch".to_string()]);
        let id = client.upload_video(&video, &metadata).await.unwrap();
        assert_eq!(id, "vid123");
    }

    #[tokio::test]
    async fn test_upload_missing_video_fails_locally() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        let metadata = VideoMetadata::new("Titre", "Description", vec![]);
        let result = client
            .upload_video("/nonexistent/compiled_video.mp4", &metadata)
            .await;
        assert!(matches!(result, Err(YoutubeError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_set_thumbnail() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/thumbnails/set"))
            .and(query_param("videoId", "vid123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let thumb = dir.path().join("thumbnail.jpg");
        std::fs::write(&thumb, b"jpeg bytes").unwrap();

        client.set_thumbnail("vid123", &thumb).await.unwrap();
    }
}
