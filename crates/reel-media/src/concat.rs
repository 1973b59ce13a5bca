//! Compilation assembly: concatenation, audio normalization, timecodes.
//!
//! Assembly runs in three ffmpeg passes, the same way the clips were
//! originally stitched: a fast video-only concat without re-encoding, an
//! audio concat with loudness normalization, then a final merge that burns
//! the timecode banners while re-encoding once.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::normalize::{escape_drawtext, overlay_font, OVERLAY_FONT_SIZE};

/// EBU R128 loudness normalization used for the combined audio track.
pub const LOUDNORM_FILTER: &str = "loudnorm=I=-16:TP=-1.5:LRA=11";

/// A timecode banner stays on screen at most this long.
pub const MAX_BANNER_SECS: f64 = 5.0;

/// One banner burned at a clip boundary of the compilation.
///
/// `start_secs` comes from the shared timeline derivation; building cues
/// from anything else risks drifting away from the description chapters.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayCue {
    /// Rendered banner text, e.g. `00:01:30 - title par broadcaster`
    pub label: String,
    /// Clip start offset within the compilation, seconds
    pub start_secs: f64,
    /// Clip duration, seconds
    pub duration_secs: f64,
}

/// Write a concat-demuxer list file for the given clips.
pub async fn write_concat_list(paths: &[PathBuf], list_path: impl AsRef<Path>) -> MediaResult<()> {
    let list_path = list_path.as_ref();
    if let Some(parent) = list_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut lines = String::new();
    for path in paths {
        let absolute = std::path::absolute(path)?;
        lines.push_str(&format!("file '{}'\n", absolute.display()));
    }
    tokio::fs::write(list_path, lines).await?;
    debug!(list = %list_path.display(), clips = paths.len(), "Wrote concat list");
    Ok(())
}

/// Concatenate the video streams without re-encoding, dropping audio.
pub async fn concat_video_only(
    list_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let cmd = FfmpegCommand::new(list_path, output)
        .input_args(["-f", "concat", "-safe", "0"])
        .output_args(["-c:v", "copy"])
        .no_audio();
    FfmpegRunner::new().run(&cmd).await
}

/// Build the audio filter graph: concat all inputs then normalize loudness.
fn build_audio_filter(input_count: usize) -> String {
    if input_count <= 1 {
        return format!("[0:a]{LOUDNORM_FILTER}");
    }
    let mut filter = String::new();
    for i in 0..input_count {
        filter.push_str(&format!("[{i}:a]"));
    }
    filter.push_str(&format!(
        "concat=n={input_count}:v=0:a=1[aout];[aout]{LOUDNORM_FILTER}"
    ));
    filter
}

/// Extract, concatenate and loudness-normalize the audio of all clips.
pub async fn concat_audio_normalized(
    clip_paths: &[PathBuf],
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let mut iter = clip_paths.iter();
    let first = iter
        .next()
        .ok_or_else(|| crate::error::MediaError::InvalidVideo("no clips to concatenate".into()))?;

    let mut cmd = FfmpegCommand::new(first, output);
    for path in iter {
        cmd = cmd.add_input(path);
    }

    let cmd = cmd
        .filter_complex(build_audio_filter(clip_paths.len()))
        .audio_codec("aac")
        .audio_bitrate("192k")
        .output_args(["-ac", "2", "-ar", "44100"])
        .no_video();

    FfmpegRunner::new().run(&cmd).await
}

/// Build the drawtext chain burning one banner per cue.
fn build_banner_filter(cues: &[OverlayCue], font: &str) -> String {
    cues.iter()
        .map(|cue| {
            let text = escape_drawtext(&cue.label);
            let end = cue.start_secs + cue.duration_secs.min(MAX_BANNER_SECS);
            format!(
                "drawtext=fontfile='{font}':text='{text}':\
                 x=(w-text_w)/2:y=h-th-20:\
                 fontsize={OVERLAY_FONT_SIZE}:fontcolor=white:\
                 box=1:boxcolor=black@0.6:\
                 enable='between(t,{:.3},{:.3})'",
                cue.start_secs, end
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Merge the concatenated video and audio, burning timecode banners.
pub async fn merge_with_timecodes(
    video_in: impl AsRef<Path>,
    audio_in: impl AsRef<Path>,
    cues: &[OverlayCue],
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let font = overlay_font();
    let cmd = FfmpegCommand::new(video_in, output)
        .add_input(audio_in)
        .filter_complex(build_banner_filter(cues, &font))
        .video_codec("libx264")
        .preset("medium")
        .crf(23)
        .output_args(["-map", "0:v:0", "-map", "1:a:0"]);

    FfmpegRunner::new().run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_filter_single_input() {
        assert_eq!(build_audio_filter(1), "[0:a]loudnorm=I=-16:TP=-1.5:LRA=11");
    }

    #[test]
    fn test_audio_filter_many_inputs() {
        let filter = build_audio_filter(3);
        assert!(filter.starts_with("[0:a][1:a][2:a]concat=n=3:v=0:a=1[aout]"));
        assert!(filter.ends_with("[aout]loudnorm=I=-16:TP=-1.5:LRA=11"));
    }

    #[test]
    fn test_banner_window_is_capped() {
        let cues = vec![OverlayCue {
            label: "00:00:00 - long clip par streamer".to_string(),
            start_secs: 0.0,
            duration_secs: 120.0,
        }];
        let filter = build_banner_filter(&cues, "sans-serif");
        assert!(filter.contains("between(t,0.000,5.000)"));
    }

    #[test]
    fn test_banner_window_short_clip() {
        let cues = vec![OverlayCue {
            label: "00:01:00 - court par streamer".to_string(),
            start_secs: 60.0,
            duration_secs: 3.5,
        }];
        let filter = build_banner_filter(&cues, "sans-serif");
        assert!(filter.contains("between(t,60.000,63.500)"));
    }

    #[test]
    fn test_banners_joined_in_cue_order() {
        let cues = vec![
            OverlayCue {
                label: "first".to_string(),
                start_secs: 0.0,
                duration_secs: 30.0,
            },
            OverlayCue {
                label: "second".to_string(),
                start_secs: 30.0,
                duration_secs: 30.0,
            },
        ];
        let filter = build_banner_filter(&cues, "sans-serif");
        let first = filter.find("text='first'").unwrap();
        let second = filter.find("text='second'").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_write_concat_list() {
        let dir = tempfile::tempdir().unwrap();
        let list_path = dir.path().join("clips_list.txt");
        let paths = vec![dir.path().join("a.mp4"), dir.path().join("b.mp4")];

        write_concat_list(&paths, &list_path).await.unwrap();

        let content = tokio::fs::read_to_string(&list_path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("file '"));
        assert!(lines[0].contains("a.mp4"));
        assert!(lines[1].contains("b.mp4"));
    }
}
