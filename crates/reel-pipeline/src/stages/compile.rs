//! Compile stage: concatenate the clips with timecode banners.

use anyhow::bail;
use reel_media::{
    concat_audio_normalized, concat_video_only, merge_with_timecodes, write_concat_list,
    OverlayCue,
};
use reel_models::{format_timecode, DownloadedClip};
use reel_select::build_timeline;
use std::path::PathBuf;

use crate::artifacts::{read_json, ArtifactPaths};
use crate::config::PipelineConfig;
use crate::logging::StageLogger;

/// Run the compile stage.
pub async fn run(config: &PipelineConfig, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start("compiling the video");
    let paths = ArtifactPaths::new(config);

    if !paths.downloaded_clips().exists() {
        bail!(
            "downloaded-clips artifact {} not found, run the download stage first",
            paths.downloaded_clips().display()
        );
    }
    let clips: Vec<DownloadedClip> = read_json(paths.downloaded_clips()).await?;
    if clips.is_empty() {
        logger.completion("no downloaded clips, nothing to compile");
        return Ok(());
    }

    // Hard cap on compilation length, applied downstream of selection in
    // final-list order.
    let clips: Vec<DownloadedClip> = clips
        .into_iter()
        .filter(|clip| clip.duration > 0.0 && clip.path.exists())
        .take(config.selection.max_total_clips)
        .collect();
    if clips.is_empty() {
        logger.warning("no valid clip files after filtering, nothing to compile");
        return Ok(());
    }
    logger.progress(&format!(
        "compiling {} clips (cap {})",
        clips.len(),
        config.selection.max_total_clips
    ));

    // The banner cues and the description chapters must agree; both derive
    // their offsets from this one timeline.
    let cues: Vec<OverlayCue> = build_timeline(&clips)
        .into_iter()
        .map(|entry| OverlayCue {
            label: format!(
                "{} - {} par {}",
                format_timecode(entry.offset_secs),
                entry.item.title,
                entry.item.broadcaster_name
            ),
            start_secs: entry.offset_secs,
            duration_secs: entry.item.duration,
        })
        .collect();

    let clip_paths: Vec<PathBuf> = clips.iter().map(|clip| clip.path.clone()).collect();
    let list_path = paths.concat_list();
    let temp_video = paths.temp_concat_video();
    let temp_audio = paths.temp_concat_audio();
    let compiled = paths.compiled_video();

    write_concat_list(&clip_paths, &list_path).await?;

    logger.progress("concatenating video streams");
    concat_video_only(&list_path, &temp_video).await?;

    logger.progress("concatenating and normalizing audio");
    concat_audio_normalized(&clip_paths, &temp_audio).await?;

    logger.progress("burning timecodes and merging");
    merge_with_timecodes(&temp_video, &temp_audio, &cues, &compiled).await?;

    // Leftover intermediates are only disk noise; removal failures don't
    // matter.
    let _ = tokio::fs::remove_file(&temp_video).await;
    let _ = tokio::fs::remove_file(&temp_audio).await;
    let _ = tokio::fs::remove_file(&list_path).await;

    let total_secs: f64 = clips.iter().map(|clip| clip.duration).sum();
    logger.completion(&format!(
        "compiled {} clips ({}) into {}",
        clips.len(),
        format_timecode(total_secs),
        compiled.display()
    ));
    Ok(())
}
