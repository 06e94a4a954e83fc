use admin_logging::{admin_info, admin_warn};
use futures_util::future::join_all;
use scraper_admin_core::{BulkScrapeJob, GameId, ItemStatus, ScrapeTarget};
use tokio_util::sync::CancellationToken;

use crate::{AdminEvent, ProgressSink, SaveGameInput, ScrapeApi};

#[derive(Debug, Clone, Default)]
pub struct BulkRunOptions {
    /// Venue assigned to saved games; backend default when unset.
    pub venue_id: Option<String>,
}

/// Runs fetch-then-save for every ID of the job. Batches run in order; the
/// items of one batch run concurrently. Each ID gets a single attempt.
///
/// Cancelling stops before the next batch; items never started stay Pending.
pub async fn run_bulk_scrape(
    api: &dyn ScrapeApi,
    mut job: BulkScrapeJob,
    options: &BulkRunOptions,
    sink: &dyn ProgressSink,
    cancel: CancellationToken,
) -> BulkScrapeJob {
    let batches: Vec<Vec<GameId>> = job.batches().map(<[GameId]>::to_vec).collect();
    let target = job.target().clone();
    let skip_existing = job.skip_existing();

    for batch in batches {
        if cancel.is_cancelled() {
            admin_warn!("bulk scrape cancelled before batch starting at {:?}", batch.first());
            break;
        }
        let trails = join_all(batch.iter().map(|id| {
            scrape_one(api, &target, *id, skip_existing, options, sink)
        }))
        .await;

        for (id, trail) in batch.iter().zip(trails) {
            for status in trail {
                if let Err(err) = job.transition(*id, status) {
                    admin_warn!("bulk scrape: {}", err);
                }
            }
        }
    }

    let summary = job.summary();
    admin_info!(
        "bulk scrape finished: {} success, {} skipped, {} errors, {} not started",
        summary.success,
        summary.skipped,
        summary.error,
        summary.pending
    );
    job
}

/// Returns the statuses the item went through, in order.
async fn scrape_one(
    api: &dyn ScrapeApi,
    target: &ScrapeTarget,
    id: GameId,
    skip_existing: bool,
    options: &BulkRunOptions,
    sink: &dyn ProgressSink,
) -> Vec<ItemStatus> {
    let url = target.url_for(id);
    let mut trail = Vec::new();
    let mut step = |status: ItemStatus| {
        sink.emit(AdminEvent::BulkItem {
            id,
            status: status.clone(),
        });
        trail.push(status);
    };

    if skip_existing {
        match api.get_url_status(&url).await {
            Ok(Some(record)) if record.game_id.is_some() => {
                step(ItemStatus::Skipped);
                return trail;
            }
            Ok(_) => {}
            // Unreachable backend: the fetch would fail too, and skipping can't be honoured.
            Err(err) if err.is_transport() => {
                admin_warn!("ID {}: existence check failed ({})", id, err);
                step(ItemStatus::Error(format!("existence check failed: {err}")));
                return trail;
            }
            Err(err) => admin_warn!("ID {}: existence check rejected ({}), scraping anyway", id, err),
        }
    }

    step(ItemStatus::Fetching);
    let game = match api.fetch_game(&url).await {
        Ok(game) => game,
        Err(err) => {
            step(ItemStatus::Error(err.to_string()));
            return trail;
        }
    };

    step(ItemStatus::Saving);
    let input = SaveGameInput {
        source_url: url,
        entity_id: target.entity_id.clone(),
        venue_id: options.venue_id.clone(),
        data: game.data,
    };
    match api.save_game(&input).await {
        Ok(result) if result.success => step(ItemStatus::Success),
        Ok(result) => step(ItemStatus::Error(
            result
                .message
                .unwrap_or_else(|| "save rejected by backend".to_string()),
        )),
        Err(err) => step(ItemStatus::Error(err.to_string())),
    }
    trail
}
