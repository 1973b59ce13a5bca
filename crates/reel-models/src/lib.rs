//! Shared data models for the ClipReel pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Candidate clips fetched from the Twitch Helix API
//! - Downloaded and normalized clips on disk
//! - Video upload metadata (title, description, tags)
//! - Timecode formatting shared by the overlay and description stages

pub mod clip;
pub mod metadata;
pub mod timestamp;

// Re-export common types
pub use clip::{ClipRecord, DownloadedClip, SourcePool};
pub use metadata::VideoMetadata;
pub use timestamp::format_timecode;
