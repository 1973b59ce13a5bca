//! Fetch stage: collect candidate pools and select the compilation set.

use chrono::{Duration, Utc};
use reel_models::ClipRecord;
use reel_select::{SeenClips, SelectionOutcome, Selector};
use reel_twitch::{AppCredentials, ClipQuery, ClipSource, HelixClient};
use tracing::info;

use crate::artifacts::{write_json, ArtifactPaths};
use crate::config::PipelineConfig;
use crate::logging::StageLogger;

/// Run the fetch + selection stage.
///
/// Always writes `top_clips.json`, even when selection comes back empty;
/// downstream stages distinguish an empty artifact (nothing to do) from a
/// missing one (fetch never ran).
pub async fn run(config: &PipelineConfig, logger: &StageLogger) -> anyhow::Result<()> {
    logger.start("fetching top clips");

    let mut client = HelixClient::new(AppCredentials::from_env()?);
    client.authenticate().await?;

    let ended_at = Utc::now();
    let started_at = ended_at - Duration::days(config.lookback_days);

    // One seen-set across both collections: a clip fetched for a
    // broadcaster must not reappear in its game's batch.
    let mut seen = SeenClips::new();

    logger.progress("collecting broadcaster clips");
    let broadcaster_sources: Vec<ClipSource> = config
        .broadcaster_ids
        .iter()
        .map(|id| ClipSource::Broadcaster(id.clone()))
        .collect();
    let broadcaster_pool = collect_pool(
        &client,
        &broadcaster_sources,
        config,
        started_at,
        ended_at,
        &mut seen,
        logger,
    )
    .await;
    logger.progress(&format!(
        "collected {} unique broadcaster clips",
        broadcaster_pool.len()
    ));

    logger.progress("collecting category clips");
    let category_sources: Vec<ClipSource> = config
        .game_ids
        .iter()
        .map(|id| ClipSource::Game(id.clone()))
        .collect();
    let category_pool = collect_pool(
        &client,
        &category_sources,
        config,
        started_at,
        ended_at,
        &mut seen,
        logger,
    )
    .await;
    logger.progress(&format!(
        "collected {} unique category clips",
        category_pool.len()
    ));

    let selection = Selector::new(config.selection.clone()).select(broadcaster_pool, category_pool);

    for (rank, clip) in selection.clips.iter().enumerate() {
        info!(
            rank = rank + 1,
            clip_id = %clip.id,
            title = %clip.title,
            broadcaster = %clip.broadcaster_name,
            views = clip.view_count,
            duration_secs = clip.duration,
            "Selected clip"
        );
    }

    match selection.outcome {
        SelectionOutcome::ThresholdMet => logger.progress(&format!(
            "duration target reached with {} clips ({:.1}s)",
            selection.clips.len(),
            selection.total_duration
        )),
        SelectionOutcome::ThresholdNotReached => logger.warning(&format!(
            "pools exhausted at {:.1}s of {:.1}s target",
            selection.total_duration, config.selection.min_total_duration_secs
        )),
        SelectionOutcome::Empty => logger.warning("no viable clip was selected"),
    }

    let paths = ArtifactPaths::new(config);
    write_json(paths.top_clips(), &selection.clips).await?;
    logger.completion(&format!(
        "{} clips selected, {:.1}s total",
        selection.clips.len(),
        selection.total_duration
    ));
    Ok(())
}

/// Fetch one pool from a list of sources, deduplicating across batches.
///
/// A failed source logs a warning and contributes nothing; the original
/// pipeline tolerates per-source API errors the same way.
async fn collect_pool(
    client: &HelixClient,
    sources: &[ClipSource],
    config: &PipelineConfig,
    started_at: chrono::DateTime<Utc>,
    ended_at: chrono::DateTime<Utc>,
    seen: &mut SeenClips,
    logger: &StageLogger,
) -> Vec<ClipRecord> {
    let mut pool = Vec::new();
    for source in sources {
        let query = ClipQuery {
            source: source.clone(),
            started_at,
            ended_at,
            first: config.clips_per_source,
            language: config.language.clone(),
        };
        match client.top_clips(&query).await {
            Ok(batch) => {
                for clip in batch {
                    if !seen.contains(&clip.id) {
                        seen.insert(clip.id.clone());
                        pool.push(clip);
                    }
                }
            }
            Err(e) => {
                logger.warning(&format!("fetch failed for {source:?}: {e}"));
            }
        }
    }
    pool
}
