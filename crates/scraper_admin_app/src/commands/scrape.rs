use admin_logging::admin_info;
use anyhow::bail;
use scraper_admin_core::{BulkScrapeJob, GameId, ScanRange};
use scraper_admin_engine::{run_bulk_scrape, BulkRunOptions};

use super::{cancel_on_ctrl_c, finish_printer, spawn_event_printer};
use crate::cli::BulkArgs;
use crate::config::AppConfig;
use crate::render;

pub async fn single(
    config: &AppConfig,
    target: &str,
    id: GameId,
    venue: Option<String>,
) -> anyhow::Result<()> {
    let job = BulkScrapeJob::single(config.target(target)?, id)?;
    execute(config, job, venue).await
}

pub async fn bulk(config: &AppConfig, args: BulkArgs) -> anyhow::Result<()> {
    let target = config.target(&args.target)?;
    let range = ScanRange::parse(&args.start, &args.end)?;
    let batch_size = args.batch_size.unwrap_or(config.bulk_batch_size);
    let job = BulkScrapeJob::new(target, range, batch_size, args.skip_existing)?;
    admin_info!(
        "bulk scrape of {} IDs in batches of {}",
        job.ids().len(),
        batch_size
    );
    execute(config, job, args.venue).await
}

async fn execute(
    config: &AppConfig,
    job: BulkScrapeJob,
    venue_id: Option<String>,
) -> anyhow::Result<()> {
    let client = config.client()?;
    let options = BulkRunOptions { venue_id };
    let cancel = cancel_on_ctrl_c();
    let (sink, printer) = spawn_event_printer();

    let job = run_bulk_scrape(&client, job, &options, &sink, cancel).await;
    finish_printer(sink, printer);

    let summary = job.summary();
    println!("{}", render::bulk_summary(&summary));
    if summary.error > 0 {
        bail!("{} of {} IDs failed", summary.error, summary.total());
    }
    Ok(())
}
