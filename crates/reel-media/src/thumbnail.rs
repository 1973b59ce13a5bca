//! Thumbnail composition.
//!
//! The upload thumbnail is a 2x2 grid of first frames from the leading
//! clips, with an optional logo composited in the center. When no frames
//! are available at all, a plain fallback card is rendered with ffmpeg.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::normalize::{escape_drawtext, overlay_font};

/// Standard YouTube thumbnail dimensions.
pub const THUMB_WIDTH: u32 = 1280;
pub const THUMB_HEIGHT: u32 = 720;

/// Number of quadrants in the grid.
pub const GRID_SLOTS: usize = 4;

/// Compose the grid thumbnail from up to four frame images.
///
/// Frames that fail to load leave their quadrant black rather than failing
/// the whole composition; fewer than four frames behaves the same way.
pub fn compose_grid(
    frame_paths: &[PathBuf],
    logo_path: Option<&Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let output = output.as_ref();
    let quad_w = THUMB_WIDTH / 2;
    let quad_h = THUMB_HEIGHT / 2;
    let positions = [
        (0, 0),
        (quad_w, 0),
        (0, quad_h),
        (quad_w, quad_h),
    ];

    let mut canvas = RgbaImage::new(THUMB_WIDTH, THUMB_HEIGHT);

    for (slot, path) in frame_paths.iter().take(GRID_SLOTS).enumerate() {
        match image::open(path) {
            Ok(frame) => {
                let resized = imageops::resize(&frame, quad_w, quad_h, FilterType::Lanczos3);
                let (x, y) = positions[slot];
                imageops::overlay(&mut canvas, &resized, i64::from(x), i64::from(y));
            }
            Err(e) => {
                warn!(frame = %path.display(), error = %e, "Failed to load frame, leaving quadrant black");
            }
        }
    }

    if let Some(logo_path) = logo_path {
        match image::open(logo_path) {
            Ok(logo) => {
                let logo = logo.to_rgba8();
                let x = (i64::from(THUMB_WIDTH) - i64::from(logo.width())) / 2;
                let y = (i64::from(THUMB_HEIGHT) - i64::from(logo.height())) / 2;
                imageops::overlay(&mut canvas, &logo, x, y);
                info!("Composited logo onto thumbnail");
            }
            Err(e) => {
                warn!(logo = %logo_path.display(), error = %e, "Failed to load logo, thumbnail left without it");
            }
        }
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // JPEG has no alpha channel; flatten before saving.
    DynamicImage::ImageRgba8(canvas).to_rgb8().save(output)?;
    info!(output = %output.display(), "Thumbnail composed");
    Ok(())
}

/// Render a plain fallback thumbnail with a centered message.
pub async fn fallback_thumbnail(message: &str, output: impl AsRef<Path>) -> MediaResult<()> {
    let output = output.as_ref();
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let font = overlay_font();
    let text = escape_drawtext(message);
    let filter = format!(
        "drawtext=fontfile='{font}':text='{text}':\
         x=(w-text_w)/2:y=(h-text_h)/2:\
         fontsize=40:fontcolor=white"
    );

    let cmd = FfmpegCommand::lavfi(
        format!("color=c=black:s={THUMB_WIDTH}x{THUMB_HEIGHT}:d=1"),
        output,
    )
    .video_filter(filter)
    .output_args(["-frames:v", "1"]);

    FfmpegRunner::new().run(&cmd).await
}
