//! Selection configuration.

/// Configuration for one selection run.
///
/// Constructed once per run from pipeline configuration and consumed by
/// [`crate::Selector`]; not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Target minimum aggregate duration of the final compilation, seconds.
    pub min_total_duration_secs: f64,

    /// Maximum clips admitted per broadcaster.
    pub max_clips_per_broadcaster: u32,

    /// When true, broadcaster-pool clips are exhausted before any
    /// category-pool clip is considered. When false, both pools compete in
    /// one globally view-sorted list.
    pub strict_priority: bool,

    /// Minimum number of clips required, jointly with the duration target,
    /// before selection stops early.
    pub min_clip_count: usize,

    /// Hard cap on the compiled clip count, enforced downstream of
    /// selection at the compile stage.
    pub max_total_clips: usize,

    /// Language guard re-applied by the classic policy before sorting.
    /// `None` disables the guard.
    pub language: Option<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            // 10 minutes 30 seconds
            min_total_duration_secs: 630.0,
            max_clips_per_broadcaster: 3,
            strict_priority: false,
            min_clip_count: 3,
            max_total_clips: 30,
            language: Some("fr".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectionConfig::default();
        assert_eq!(config.min_total_duration_secs, 630.0);
        assert_eq!(config.max_clips_per_broadcaster, 3);
        assert!(!config.strict_priority);
        assert_eq!(config.min_clip_count, 3);
        assert_eq!(config.max_total_clips, 30);
    }
}
