//! Clip download using yt-dlp.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::command::stderr_tail;
use crate::error::{MediaError, MediaResult};

/// Format selection for clip downloads.
const YTDLP_FORMAT: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best";

/// Twitch clips are short; anything smaller than this is a failed download.
const MIN_CLIP_FILE_SIZE: u64 = 64 * 1024;

/// Download a clip from its public URL into `output_path`.
///
/// An existing plausible file is reused instead of re-downloading, so a
/// crashed run can be resumed without re-fetching every clip.
pub async fn download_clip(url: &str, output_path: impl AsRef<Path>) -> MediaResult<()> {
    let output_path = output_path.as_ref();

    if output_path.exists() {
        if let Ok(metadata) = output_path.metadata() {
            if metadata.len() > MIN_CLIP_FILE_SIZE {
                info!("Using existing clip file: {}", output_path.display());
                return Ok(());
            }
            warn!(
                "Existing file {} is too small ({} bytes), re-downloading",
                output_path.display(),
                metadata.len()
            );
            tokio::fs::remove_file(output_path).await?;
        }
    }

    which::which("yt-dlp").map_err(|_| MediaError::YtDlpNotFound)?;

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    debug!(url = %url, output = %output_path.display(), "Downloading clip");

    let output = Command::new("yt-dlp")
        .args([
            "--no-progress",
            "--output",
            &output_path.to_string_lossy(),
            "--format",
            YTDLP_FORMAT,
            url,
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed for {}: {}",
            url,
            stderr_tail(&stderr)
        )));
    }

    if !output_path.exists() {
        return Err(MediaError::download_failed(format!(
            "yt-dlp reported success but {} was not created",
            output_path.display()
        )));
    }

    let file_size = output_path.metadata()?.len();
    info!(
        output = %output_path.display(),
        size_kb = file_size / 1024,
        "Downloaded clip"
    );

    Ok(())
}
