//! Download stage: fetch each selected clip and normalize it.

use anyhow::bail;
use reel_media::{download_clip, extract_first_frame, normalize_clip, probe_duration};
use reel_models::{ClipRecord, DownloadedClip};

use crate::artifacts::{read_json, write_json, ArtifactPaths};
use crate::config::PipelineConfig;
use crate::logging::StageLogger;

/// Run the download + normalize stage.
///
/// Per-clip failures are logged and skipped; one broken clip must not sink
/// the whole compilation. The probed duration of the processed file
/// replaces the API-reported one from here on.
pub async fn run(config: &PipelineConfig, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start("downloading and normalizing clips");
    let paths = ArtifactPaths::new(config);

    if !paths.top_clips().exists() {
        write_json(paths.downloaded_clips(), &Vec::<DownloadedClip>::new()).await?;
        bail!(
            "selected-clips artifact {} not found, run the fetch stage first",
            paths.top_clips().display()
        );
    }
    let clips: Vec<ClipRecord> = read_json(paths.top_clips()).await?;

    if clips.is_empty() {
        write_json(paths.downloaded_clips(), &Vec::<DownloadedClip>::new()).await?;
        logger.completion("no clips to download");
        return Ok(());
    }

    let total = clips.len();
    let mut downloaded = Vec::new();
    for (i, clip) in clips.into_iter().enumerate() {
        logger.progress(&format!(
            "clip {}/{}: '{}' by {}",
            i + 1,
            total,
            clip.title,
            clip.broadcaster_name
        ));
        match process_clip(&clip, &paths, logger).await {
            Ok(processed) => downloaded.push(processed),
            Err(e) => {
                logger.warning(&format!("skipping clip {}: {e}", clip.id));
            }
        }
    }

    write_json(paths.downloaded_clips(), &downloaded).await?;
    logger.completion(&format!("{}/{} clips ready", downloaded.len(), total));
    Ok(())
}

/// Download, normalize, frame-extract and probe one clip.
async fn process_clip(
    clip: &ClipRecord,
    paths: &ArtifactPaths,
    logger: &StageLogger,
) -> anyhow::Result<DownloadedClip> {
    let raw_path = paths.raw_clip(&clip.id);
    let processed_path = paths.processed_clip(&clip.id);
    let frame_path = paths.clip_frame(&clip.id);

    download_clip(&clip.url, &raw_path).await?;
    normalize_clip(&raw_path, &processed_path, &clip.title, &clip.broadcaster_name).await?;

    // Thumbnail composition survives without a frame; don't fail the clip.
    let first_frame_path = match extract_first_frame(&processed_path, &frame_path).await {
        Ok(()) => Some(frame_path),
        Err(e) => {
            logger.warning(&format!("frame extraction failed for {}: {e}", clip.id));
            None
        }
    };

    // The compile stage filters zero durations out; a probe failure only
    // costs this clip, not the stage.
    let duration = match probe_duration(&processed_path).await {
        Ok(secs) => secs,
        Err(e) => {
            logger.warning(&format!("probe failed for {}: {e}", clip.id));
            0.0
        }
    };

    Ok(DownloadedClip {
        id: clip.id.clone(),
        path: processed_path,
        duration,
        title: clip.title.clone(),
        broadcaster_name: clip.broadcaster_name.clone(),
        first_frame_path,
    })
}
