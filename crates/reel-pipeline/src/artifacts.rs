//! JSON stage artifacts on disk.
//!
//! Stages hand results to each other through files under the data dir, so
//! a failed run can be resumed at any stage. Path derivation lives here so
//! no two stages can disagree about where an artifact is.

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;

/// All artifact and working paths of one run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    data_dir: PathBuf,
    output_dir: PathBuf,
}

impl ArtifactPaths {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            output_dir: config.output_dir.clone(),
        }
    }

    /// Selected clips, written by the fetch stage.
    pub fn top_clips(&self) -> PathBuf {
        self.data_dir.join("top_clips.json")
    }

    /// Downloaded/normalized clips, written by the download stage.
    pub fn downloaded_clips(&self) -> PathBuf {
        self.data_dir.join("downloaded_clips.json")
    }

    /// Upload metadata, written by the metadata stage.
    pub fn video_metadata(&self) -> PathBuf {
        self.data_dir.join("video_metadata.json")
    }

    /// Composed thumbnail image.
    pub fn thumbnail(&self) -> PathBuf {
        self.data_dir.join("thumbnail.jpg")
    }

    /// Raw downloads before normalization.
    pub fn raw_clip(&self, clip_id: &str) -> PathBuf {
        self.data_dir.join("raw_clips").join(format!("{clip_id}_raw.mp4"))
    }

    /// Normalized clips ready for concatenation.
    pub fn processed_clip(&self, clip_id: &str) -> PathBuf {
        self.data_dir
            .join("processed_clips")
            .join(format!("{clip_id}_processed.mp4"))
    }

    /// First frame of a processed clip.
    pub fn clip_frame(&self, clip_id: &str) -> PathBuf {
        self.data_dir
            .join("clip_frames")
            .join(format!("{clip_id}_first_frame.jpg"))
    }

    /// Concat-demuxer list file.
    pub fn concat_list(&self) -> PathBuf {
        self.data_dir.join("clips_list.txt")
    }

    /// Final compiled video.
    pub fn compiled_video(&self) -> PathBuf {
        self.output_dir.join("compiled_video.mp4")
    }

    /// Intermediate video-only concat output.
    pub fn temp_concat_video(&self) -> PathBuf {
        self.output_dir.join("temp_concat_video_no_audio.mp4")
    }

    /// Intermediate normalized audio track.
    pub fn temp_concat_audio(&self) -> PathBuf {
        self.output_dir.join("temp_concat_audio.aac")
    }
}

/// Write a pretty-printed JSON artifact, creating parent directories.
pub async fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read a JSON artifact.
pub async fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}
