//! Thumbnail stage: compose the upload thumbnail from clip frames.

use chrono::Local;
use reel_media::thumbnail::GRID_SLOTS;
use reel_media::{compose_grid, fallback_thumbnail};
use reel_models::DownloadedClip;
use std::path::PathBuf;

use crate::artifacts::{read_json, ArtifactPaths};
use crate::config::PipelineConfig;
use crate::logging::StageLogger;

/// Run the thumbnail stage.
///
/// A missing or empty clip list degrades to a plain fallback card; the
/// upload can proceed without a grid thumbnail.
pub async fn run(config: &PipelineConfig, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start("composing the thumbnail");
    let paths = ArtifactPaths::new(config);
    let date = Local::now().format("%d/%m/%Y");

    if !paths.downloaded_clips().exists() {
        logger.warning("downloaded-clips artifact missing, rendering fallback thumbnail");
        fallback_thumbnail(
            &format!("Aucun clip trouvé pour aujourd'hui ({date})"),
            paths.thumbnail(),
        )
        .await?;
        return Ok(());
    }

    let clips: Vec<DownloadedClip> = read_json(paths.downloaded_clips()).await?;
    let frames: Vec<PathBuf> = clips
        .iter()
        .filter_map(|clip| clip.first_frame_path.clone())
        .filter(|path| path.exists())
        .take(GRID_SLOTS)
        .collect();

    if frames.is_empty() {
        logger.warning("no clip frames available, rendering fallback thumbnail");
        fallback_thumbnail(
            &format!("Aucune frame disponible ({date})"),
            paths.thumbnail(),
        )
        .await?;
        return Ok(());
    }

    let logo = config.logo_path.exists().then_some(config.logo_path.as_path());
    if logo.is_none() {
        logger.progress(&format!(
            "logo {} not found, composing without it",
            config.logo_path.display()
        ));
    }

    compose_grid(&frames, logo, paths.thumbnail())?;
    logger.completion(&format!(
        "thumbnail composed from {} frames at {}",
        frames.len(),
        paths.thumbnail().display()
    ));
    Ok(())
}
