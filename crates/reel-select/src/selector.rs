//! Final-list selection over the two candidate pools.

use reel_models::ClipRecord;
use tracing::{debug, info, warn};

use crate::config::SelectionConfig;
use crate::dedup::SeenClips;
use crate::quota::BroadcasterQuota;

/// How a selection run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Duration target and clip-count floor were both reached.
    ThresholdMet,
    /// Pools were exhausted before the stop condition was reached.
    ThresholdNotReached,
    /// No candidate was admissible at all.
    Empty,
}

/// Result of one selection run.
///
/// `clips` is in presentation order: it is the order the compilation is
/// assembled in, and the order the timeline derives offsets from.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub clips: Vec<ClipRecord>,
    pub total_duration: f64,
    pub outcome: SelectionOutcome,
}

/// Selects the final clip list from the broadcaster and category pools.
///
/// One `Selector` drives exactly one run: [`Selector::select`] consumes it
/// together with its dedup set and quota counters.
///
/// Candidates are ranked by view count descending with a stable sort, so
/// clips with equal view counts keep their fetch order. Given identical
/// pools and configuration the output is identical.
#[derive(Debug)]
pub struct Selector {
    config: SelectionConfig,
    seen: SeenClips,
    quota: BroadcasterQuota,
}

impl Selector {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            seen: SeenClips::new(),
            quota: BroadcasterQuota::new(),
        }
    }

    /// Run selection over the two pools.
    ///
    /// Strict-priority policy: admit from the view-sorted broadcaster pool
    /// first, then top up from the view-sorted category pool if the stop
    /// condition was not reached.
    ///
    /// Classic policy: both pools compete in one view-sorted list, with the
    /// language guard re-applied before sorting.
    pub fn select(
        mut self,
        broadcaster_pool: Vec<ClipRecord>,
        category_pool: Vec<ClipRecord>,
    ) -> Selection {
        let mut clips = Vec::new();
        let mut total_duration = 0.0_f64;

        if self.config.strict_priority {
            info!(
                min_duration_secs = self.config.min_total_duration_secs,
                "Selecting with strict broadcaster priority"
            );
            let done = self.admit_from(
                sorted_by_views(broadcaster_pool),
                &mut clips,
                &mut total_duration,
            );
            if !done {
                debug!(
                    accumulated_secs = total_duration,
                    "Duration target not reached from broadcaster pool, topping up from category pool"
                );
                self.admit_from(
                    sorted_by_views(category_pool),
                    &mut clips,
                    &mut total_duration,
                );
            }
        } else {
            info!(
                min_duration_secs = self.config.min_total_duration_secs,
                "Selecting from globally view-sorted pools"
            );
            let mut combined: Vec<ClipRecord> = broadcaster_pool;
            combined.extend(category_pool);
            // The API occasionally returns out-of-language clips; the
            // classic policy re-filters here before ranking.
            if let Some(lang) = self.config.language.clone() {
                combined.retain(|clip| clip.language == lang);
            }
            self.admit_from(sorted_by_views(combined), &mut clips, &mut total_duration);
        }

        let outcome = if clips.is_empty() {
            warn!("No admissible clip was selected");
            SelectionOutcome::Empty
        } else if !self.stop_condition(total_duration, clips.len()) {
            warn!(
                total_duration_secs = total_duration,
                min_duration_secs = self.config.min_total_duration_secs,
                clip_count = clips.len(),
                "Pools exhausted before reaching the duration target"
            );
            SelectionOutcome::ThresholdNotReached
        } else {
            SelectionOutcome::ThresholdMet
        };

        Selection {
            clips,
            total_duration,
            outcome,
        }
    }

    /// Admit clips from one sorted pool until the stop condition is met or
    /// the pool is exhausted. Returns true if the stop condition was met.
    fn admit_from(
        &mut self,
        pool: Vec<ClipRecord>,
        clips: &mut Vec<ClipRecord>,
        total_duration: &mut f64,
    ) -> bool {
        for clip in pool {
            if self.seen.contains(&clip.id) {
                debug!(clip_id = %clip.id, "Skipped: already admitted");
                continue;
            }
            if !clip.is_admissible() {
                debug!(clip_id = %clip.id, duration = clip.duration, "Skipped: invalid record");
                continue;
            }
            if !self
                .quota
                .can_admit(&clip.broadcaster_id, self.config.max_clips_per_broadcaster)
            {
                debug!(
                    clip_id = %clip.id,
                    broadcaster = %clip.broadcaster_name,
                    cap = self.config.max_clips_per_broadcaster,
                    "Skipped: broadcaster quota reached"
                );
                continue;
            }

            self.seen.insert(clip.id.clone());
            self.quota.record(clip.broadcaster_id.clone());
            *total_duration += clip.duration;
            debug!(
                clip_id = %clip.id,
                title = %clip.title,
                broadcaster = %clip.broadcaster_name,
                views = clip.view_count,
                duration_secs = clip.duration,
                accumulated_secs = *total_duration,
                "Admitted clip"
            );
            clips.push(clip);

            if self.stop_condition(*total_duration, clips.len()) {
                info!(
                    clip_count = clips.len(),
                    total_duration_secs = *total_duration,
                    "Duration target reached"
                );
                return true;
            }
        }
        false
    }

    fn stop_condition(&self, total_duration: f64, count: usize) -> bool {
        total_duration >= self.config.min_total_duration_secs
            && count >= self.config.min_clip_count
    }
}

/// Stable descending sort by view count; ties keep input (fetch) order.
fn sorted_by_views(mut pool: Vec<ClipRecord>) -> Vec<ClipRecord> {
    pool.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::SourcePool;

    fn clip(id: &str, broadcaster: &str, views: u64, duration: f64, source: SourcePool) -> ClipRecord {
        ClipRecord {
            id: id.to_string(),
            url: format!("https://clips.twitch.tv/{id}"),
            embed_url: None,
            thumbnail_url: None,
            title: format!("clip {id}"),
            view_count: views,
            broadcaster_id: broadcaster.to_string(),
            broadcaster_name: format!("streamer_{broadcaster}"),
            game_name: None,
            created_at: None,
            duration,
            language: "fr".to_string(),
            source,
        }
    }

    fn config(min_duration: f64, cap: u32, strict: bool, floor: usize) -> SelectionConfig {
        SelectionConfig {
            min_total_duration_secs: min_duration,
            max_clips_per_broadcaster: cap,
            strict_priority: strict,
            min_clip_count: floor,
            ..SelectionConfig::default()
        }
    }

    #[test]
    fn test_quota_keeps_most_viewed_clip() {
        let pool = vec![
            clip("a", "1", 50, 100.0, SourcePool::Broadcaster),
            clip("b", "1", 90, 100.0, SourcePool::Broadcaster),
        ];
        let selection = Selector::new(config(1000.0, 1, true, 1)).select(pool, vec![]);

        assert_eq!(selection.clips.len(), 1);
        assert_eq!(selection.clips[0].id, "b");
        assert_eq!(selection.outcome, SelectionOutcome::ThresholdNotReached);
    }

    #[test]
    fn test_stops_once_duration_and_floor_are_met() {
        let pool = vec![
            clip("x", "1", 300, 100.0, SourcePool::Broadcaster),
            clip("y", "2", 200, 80.0, SourcePool::Broadcaster),
            clip("z", "3", 100, 60.0, SourcePool::Broadcaster),
        ];
        let selection = Selector::new(config(150.0, 3, true, 1)).select(pool, vec![]);

        assert_eq!(selection.clips.len(), 2);
        assert_eq!(selection.clips[0].id, "x");
        assert_eq!(selection.clips[1].id, "y");
        assert_eq!(selection.total_duration, 180.0);
        assert_eq!(selection.outcome, SelectionOutcome::ThresholdMet);
    }

    #[test]
    fn test_empty_pools_yield_empty_outcome() {
        let selection = Selector::new(config(630.0, 3, false, 3)).select(vec![], vec![]);
        assert!(selection.clips.is_empty());
        assert_eq!(selection.total_duration, 0.0);
        assert_eq!(selection.outcome, SelectionOutcome::Empty);
    }

    #[test]
    fn test_same_id_in_both_pools_admitted_once() {
        let b = vec![clip("dup", "1", 500, 30.0, SourcePool::Broadcaster)];
        let c = vec![
            clip("dup", "1", 500, 30.0, SourcePool::Category),
            clip("other", "2", 400, 30.0, SourcePool::Category),
        ];
        let selection = Selector::new(config(1000.0, 3, true, 1)).select(b, c);

        let ids: Vec<&str> = selection.clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["dup", "other"]);
    }

    #[test]
    fn test_invalid_records_silently_excluded() {
        let pool = vec![
            clip("zero", "1", 900, 0.0, SourcePool::Broadcaster),
            clip("", "1", 800, 30.0, SourcePool::Broadcaster),
            clip("ok", "1", 100, 30.0, SourcePool::Broadcaster),
        ];
        let selection = Selector::new(config(1000.0, 3, true, 1)).select(pool, vec![]);

        assert_eq!(selection.clips.len(), 1);
        assert_eq!(selection.clips[0].id, "ok");
    }

    #[test]
    fn test_strict_priority_prefers_broadcaster_pool() {
        let b = vec![clip("low_views", "1", 5, 60.0, SourcePool::Broadcaster)];
        let c = vec![clip("high_views", "2", 1000, 60.0, SourcePool::Category)];
        let selection = Selector::new(config(120.0, 3, true, 1)).select(b, c);

        let ids: Vec<&str> = selection.clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["low_views", "high_views"]);
    }

    #[test]
    fn test_classic_policy_sorts_globally() {
        let b = vec![clip("low_views", "1", 5, 60.0, SourcePool::Broadcaster)];
        let c = vec![clip("high_views", "2", 1000, 60.0, SourcePool::Category)];
        let selection = Selector::new(config(120.0, 3, false, 1)).select(b, c);

        let ids: Vec<&str> = selection.clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["high_views", "low_views"]);
    }

    #[test]
    fn test_classic_policy_reapplies_language_guard() {
        let mut foreign = clip("en", "1", 9000, 60.0, SourcePool::Category);
        foreign.language = "en".to_string();
        let c = vec![foreign, clip("fr", "2", 10, 60.0, SourcePool::Category)];
        let selection = Selector::new(config(1000.0, 3, false, 1)).select(vec![], c);

        let ids: Vec<&str> = selection.clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["fr"]);
    }

    #[test]
    fn test_quota_spans_both_pools_in_strict_mode() {
        let b = vec![
            clip("a", "1", 100, 60.0, SourcePool::Broadcaster),
            clip("b", "1", 90, 60.0, SourcePool::Broadcaster),
        ];
        let c = vec![clip("c", "1", 80, 60.0, SourcePool::Category)];
        let selection = Selector::new(config(1000.0, 2, true, 1)).select(b, c);

        let ids: Vec<&str> = selection.clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_equal_views_keep_fetch_order() {
        let pool = vec![
            clip("first", "1", 100, 30.0, SourcePool::Broadcaster),
            clip("second", "2", 100, 30.0, SourcePool::Broadcaster),
            clip("third", "3", 100, 30.0, SourcePool::Broadcaster),
        ];
        let selection = Selector::new(config(1000.0, 3, true, 1)).select(pool, vec![]);

        let ids: Vec<&str> = selection.clips.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let b = vec![
            clip("a", "1", 100, 60.0, SourcePool::Broadcaster),
            clip("b", "2", 100, 45.0, SourcePool::Broadcaster),
            clip("c", "3", 90, 30.0, SourcePool::Broadcaster),
        ];
        let c = vec![
            clip("d", "4", 100, 60.0, SourcePool::Category),
            clip("e", "5", 110, 20.0, SourcePool::Category),
        ];
        let cfg = config(160.0, 2, false, 2);

        let first = Selector::new(cfg.clone()).select(b.clone(), c.clone());
        let second = Selector::new(cfg).select(b, c);
        assert_eq!(first, second);
    }
}
