//! First-frame extraction for thumbnail composition.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Extract the first frame of a video as a high-quality JPEG.
pub async fn extract_first_frame(
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let cmd = FfmpegCommand::new(video_path, output_path)
        .single_frame()
        .frame_quality(2);

    FfmpegRunner::new().run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_extraction_args() {
        let cmd = FfmpegCommand::new("clip.mp4", "frame.jpg")
            .single_frame()
            .frame_quality(2);
        let args = cmd.build_args();
        assert!(args.windows(2).any(|w| w == ["-vframes", "1"]));
        assert!(args.windows(2).any(|w| w == ["-q:v", "2"]));
    }
}
