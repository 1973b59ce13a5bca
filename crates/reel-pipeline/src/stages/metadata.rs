//! Metadata stage: title, chaptered description and tags for the upload.

use anyhow::bail;
use chrono::{Datelike, Local, NaiveDate};
use reel_models::{format_timecode, DownloadedClip, VideoMetadata};
use reel_select::build_timeline;

use crate::artifacts::{read_json, write_json, ArtifactPaths};
use crate::config::PipelineConfig;
use crate::logging::StageLogger;

/// Fixed upload tags.
const VIDEO_TAGS: &[&str] = &[
    "Twitch", "Clips", "Highlights", "Gaming", "France", "Français", "Best Of", "Drôle",
];

/// French month names; formatting dates through the process locale would
/// be global mutable state.
const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Run the metadata stage.
pub async fn run(config: &PipelineConfig, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start("generating video metadata");
    let paths = ArtifactPaths::new(config);
    let today = Local::now().date_naive();

    if !paths.downloaded_clips().exists() {
        // Leave a usable artifact behind before failing, the way the
        // download stage leaves an empty clip list.
        write_json(paths.video_metadata(), &default_metadata(config, today)).await?;
        bail!(
            "downloaded-clips artifact {} not found, run the download stage first",
            paths.downloaded_clips().display()
        );
    }

    let clips: Vec<DownloadedClip> = read_json(paths.downloaded_clips()).await?;
    if clips.is_empty() {
        logger.warning("no downloaded clips, writing default metadata");
        write_json(paths.video_metadata(), &default_metadata(config, today)).await?;
        logger.completion("default metadata written");
        return Ok(());
    }

    let mut metadata = VideoMetadata::new(
        build_title(&clips[0].title, today),
        build_description(&clips),
        VIDEO_TAGS.iter().map(|t| (*t).to_string()).collect(),
    );
    metadata.privacy_status = config.privacy_status.clone();

    write_json(paths.video_metadata(), &metadata).await?;
    logger.completion(&format!("metadata written, title: {}", metadata.title));
    Ok(())
}

fn default_metadata(config: &PipelineConfig, today: NaiveDate) -> VideoMetadata {
    let mut metadata = VideoMetadata::new(
        format!("Compilation Twitch FR du {}", today.format("%d/%m/%Y")),
        "Aucun clip disponible pour cette compilation.",
        VIDEO_TAGS.iter().map(|t| (*t).to_string()).collect(),
    );
    metadata.privacy_status = config.privacy_status.clone();
    metadata
}

/// Title: first clip's title plus the series suffix and date.
fn build_title(first_clip_title: &str, date: NaiveDate) -> String {
    format!(
        "{} | Le Clip Twitch du Jour FR - {}",
        first_clip_title,
        french_date(date)
    )
}

/// Format a date as e.g. "03 juillet 2026".
fn french_date(date: NaiveDate) -> String {
    let month = FRENCH_MONTHS[date.month0() as usize];
    format!("{:02} {} {}", date.day(), month, date.year())
}

/// Description with one chapter line per clip.
///
/// Chapter offsets come from the same timeline derivation the overlay
/// banners use, so the description can never drift from the video.
fn build_description(clips: &[DownloadedClip]) -> String {
    let mut lines = vec![
        "Bienvenue sur notre chaîne ! Découvrez les moments les plus drôles, épiques et mémorables de Twitch.".to_string(),
        "Abonnez-vous pour ne rien manquer des prochains Top Clips !".to_string(),
        String::new(),
        "Chapitres et clips inclus :".to_string(),
    ];

    for entry in build_timeline(clips) {
        lines.push(format!(
            "{} - {} par {}",
            format_timecode(entry.offset_secs),
            entry.item.title,
            entry.item.broadcaster_name
        ));
    }

    lines.extend([
        String::new(),
        "Merci d'avoir regardé !".to_string(),
        "Laissez un like et un commentaire si la vidéo vous a plu.".to_string(),
        "N'oubliez pas de vous abonner pour plus de contenu !".to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn downloaded(id: &str, duration: f64) -> DownloadedClip {
        DownloadedClip {
            id: id.to_string(),
            path: PathBuf::from(format!("data/processed_clips/{id}_processed.mp4")),
            duration,
            title: format!("titre {id}"),
            broadcaster_name: format!("streamer {id}"),
            first_frame_path: None,
        }
    }

    #[test]
    fn test_french_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 3).unwrap();
        assert_eq!(french_date(date), "03 juillet 2026");
        let date = NaiveDate::from_ymd_opt(2026, 12, 25).unwrap();
        assert_eq!(french_date(date), "25 décembre 2026");
    }

    #[test]
    fn test_build_title() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(
            build_title("Il clutch en 1v5", date),
            "Il clutch en 1v5 | Le Clip Twitch du Jour FR - 06 août 2026"
        );
    }

    #[test]
    fn test_description_chapter_offsets() {
        let clips = vec![downloaded("a", 30.0), downloaded("b", 45.0), downloaded("c", 10.0)];
        let description = build_description(&clips);

        assert!(description.contains("00:00:00 - titre a par streamer a"));
        assert!(description.contains("00:00:30 - titre b par streamer b"));
        assert!(description.contains("00:01:15 - titre c par streamer c"));
    }

    #[test]
    fn test_description_has_intro_and_outro() {
        let clips = vec![downloaded("a", 30.0)];
        let description = build_description(&clips);

        assert!(description.starts_with("Bienvenue sur notre chaîne !"));
        assert!(description.contains("Chapitres et clips inclus :"));
        assert!(description.ends_with("N'oubliez pas de vous abonner pour plus de contenu !"));
    }
}
