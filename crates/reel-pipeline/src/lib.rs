//! ClipReel compilation pipeline.
//!
//! Orchestrates the stages that turn a window of Twitch activity into an
//! uploaded compilation: fetch + select, download + normalize, compile,
//! thumbnail, metadata, upload. Stages communicate through JSON artifacts
//! on disk so any stage can be re-run in isolation.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod logging;
pub mod stages;
