//! Start-offset derivation for the final clip list.
//!
//! The compiled video burns a timecode banner at each clip boundary and the
//! description carries matching chapter markers. Both must be derived from
//! the same final list through this module; recomputing duration sums in
//! each consumer is how they drift apart.

use reel_models::{ClipRecord, DownloadedClip};

/// Anything with a playback duration the timeline can accumulate.
pub trait Timed {
    fn duration_secs(&self) -> f64;
}

impl Timed for ClipRecord {
    fn duration_secs(&self) -> f64 {
        self.duration
    }
}

impl Timed for DownloadedClip {
    fn duration_secs(&self) -> f64 {
        self.duration
    }
}

/// One clip with its start offset within the assembled output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry<'a, T> {
    pub item: &'a T,
    /// Seconds from the start of the compilation to this clip's first frame.
    pub offset_secs: f64,
}

/// Compute per-clip start offsets in final-list order.
///
/// `offset[0] == 0` and `offset[i] == offset[i-1] + duration[i-1]`.
/// Empty input yields empty output.
pub fn build_timeline<T: Timed>(items: &[T]) -> Vec<TimelineEntry<'_, T>> {
    let mut entries = Vec::with_capacity(items.len());
    let mut offset_secs = 0.0_f64;
    for item in items {
        entries.push(TimelineEntry { item, offset_secs });
        offset_secs += item.duration_secs();
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dur(f64);

    impl Timed for Dur {
        fn duration_secs(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_offsets_are_running_sums() {
        let items = [Dur(30.0), Dur(45.0), Dur(10.0)];
        let timeline = build_timeline(&items);

        let offsets: Vec<f64> = timeline.iter().map(|e| e.offset_secs).collect();
        assert_eq!(offsets, vec![0.0, 30.0, 75.0]);
    }

    #[test]
    fn test_empty_input_yields_empty_timeline() {
        let items: [Dur; 0] = [];
        assert!(build_timeline(&items).is_empty());
    }

    #[test]
    fn test_first_offset_is_zero() {
        let items = [Dur(12.5)];
        let timeline = build_timeline(&items);
        assert_eq!(timeline[0].offset_secs, 0.0);
    }
}
