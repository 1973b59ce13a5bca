//! Clip selection and timeline derivation.
//!
//! This crate owns the compilation-assembly core:
//! - [`SeenClips`] tracks admitted clip ids across fetch pools
//! - [`BroadcasterQuota`] caps how many clips one channel contributes
//! - [`Selector`] turns two candidate pools into an ordered final list
//! - [`timeline`] derives per-clip start offsets from the final list
//!
//! Everything here is pure, single-threaded, in-memory computation over
//! already-fetched data. An empty result or an unmet duration threshold is
//! an outcome, never an error; the caller decides what to do with it.

pub mod config;
pub mod dedup;
pub mod quota;
pub mod selector;
pub mod timeline;

pub use config::SelectionConfig;
pub use dedup::SeenClips;
pub use quota::BroadcasterQuota;
pub use selector::{Selection, SelectionOutcome, Selector};
pub use timeline::{build_timeline, Timed, TimelineEntry};
