//! Clip normalization to a common format.
//!
//! Raw clips arrive with mixed resolutions, frame rates and codecs; the
//! concat demuxer needs identical parameters across every input. Each clip
//! is re-encoded to 1920x1080 / 30 fps / yuv420p with the clip title and
//! broadcaster name burned in near the top of the frame.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Target frame size.
pub const TARGET_WIDTH: u32 = 1920;
pub const TARGET_HEIGHT: u32 = 1080;

/// Target frame rate.
pub const TARGET_FPS: u32 = 30;

/// Overlay font size for the title and broadcaster lines.
pub const OVERLAY_FONT_SIZE: u32 = 36;

/// Font files tried in order; ffmpeg falls back to a family name.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

/// Pick a drawtext font path, falling back to a generic family name.
pub fn overlay_font() -> String {
    for candidate in FONT_CANDIDATES {
        if Path::new(candidate).exists() {
            return (*candidate).to_string();
        }
    }
    tracing::warn!("No TrueType font found, using generic 'sans-serif' family");
    "sans-serif".to_string()
}

/// Escape text for the ffmpeg drawtext filter.
///
/// Backslashes must be escaped first; quotes, colons, brackets and commas
/// all carry meaning inside a filter graph.
pub fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace(',', "\\,")
}

/// Build the normalization filter chain with title/broadcaster overlays.
fn build_normalize_filter(title: &str, broadcaster_name: &str, font: &str) -> String {
    let title = escape_drawtext(title);
    let broadcaster = escape_drawtext(broadcaster_name);

    let title_overlay = format!(
        "drawtext=fontfile='{font}':text='{title}':\
         x=(w-text_w)/2:y=H*0.04:\
         fontcolor=white:fontsize={OVERLAY_FONT_SIZE}:\
         bordercolor=black:borderw=2"
    );
    let broadcaster_overlay = format!(
        "drawtext=fontfile='{font}':text='{broadcaster}':\
         x=(w-text_w)/2:y=H*0.04+text_h+5:\
         fontcolor=white:fontsize={OVERLAY_FONT_SIZE}:\
         bordercolor=black:borderw=2"
    );

    format!(
        "scale={TARGET_WIDTH}:{TARGET_HEIGHT}:force_original_aspect_ratio=decrease,\
         pad={TARGET_WIDTH}:{TARGET_HEIGHT}:(ow-iw)/2:(oh-ih)/2,\
         setsar=1,fps={TARGET_FPS},\
         {title_overlay},\
         {broadcaster_overlay}"
    )
}

/// Re-encode a raw clip into the common compilation format.
pub async fn normalize_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    title: &str,
    broadcaster_name: &str,
) -> MediaResult<()> {
    let font = overlay_font();
    let filter = build_normalize_filter(title, broadcaster_name, &font);

    let cmd = FfmpegCommand::new(input, output)
        .video_filter(filter)
        .video_codec("libx264")
        .preset("fast")
        .crf(23)
        .output_args(["-pix_fmt", "yuv420p"])
        .audio_codec("aac")
        .audio_bitrate("192k")
        .output_args(["-ac", "2", "-ar", "44100"]);

    FfmpegRunner::new().run(&cmd).await
}
