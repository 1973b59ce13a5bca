//! Upload stage: publish the compiled video.

use anyhow::bail;
use reel_models::VideoMetadata;
use reel_youtube::{clean_title, RefreshCredentials, YoutubeClient};
use tracing::info;

use crate::artifacts::{read_json, ArtifactPaths};
use crate::config::PipelineConfig;
use crate::logging::StageLogger;

/// Run the upload stage.
///
/// A failed thumbnail set is a warning (the auto-generated thumbnail
/// remains); a failed video insert fails the stage.
pub async fn run(config: &PipelineConfig, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start("uploading to YouTube");
    let paths = ArtifactPaths::new(config);

    if !paths.video_metadata().exists() {
        bail!(
            "metadata artifact {} not found, run the metadata stage first",
            paths.video_metadata().display()
        );
    }
    let mut metadata: VideoMetadata = read_json(paths.video_metadata()).await?;

    let video_path = paths.compiled_video();
    if !video_path.exists() {
        bail!("compiled video {} not found, run the compile stage first", video_path.display());
    }

    // The stored title still carries the raw clip title; enforce the
    // platform limits only at the upload boundary.
    metadata.title = clean_title(&metadata.title);

    let mut client = YoutubeClient::new(RefreshCredentials::from_env()?);
    client.authenticate().await?;

    let video_id = client.upload_video(&video_path, &metadata).await?;
    info!(
        video_id = %video_id,
        "Video published: https://www.youtube.com/watch?v={}", video_id
    );

    let thumbnail_path = paths.thumbnail();
    if thumbnail_path.exists() {
        if let Err(e) = client.set_thumbnail(&video_id, &thumbnail_path).await {
            logger.warning(&format!("thumbnail upload failed: {e}"));
        }
    } else {
        logger.warning("no thumbnail found, skipping thumbnail upload");
    }

    logger.completion(&format!("uploaded video {video_id}"));
    Ok(())
}
