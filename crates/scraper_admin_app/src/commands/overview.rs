use scraper_admin_engine::{AdminApi, JobFilter, JobStatus, TimeWindow};

use super::print_next_page;
use crate::cli::PageArgs;
use crate::config::AppConfig;
use crate::render;

pub async fn overview(config: &AppConfig, window: TimeWindow) -> anyhow::Result<()> {
    let client = config.client()?;
    let overview = client.get_overview(window).await?;
    print!("{}", render::overview(&overview));
    Ok(())
}

pub async fn gaps(config: &AppConfig, target: &str) -> anyhow::Result<()> {
    let target = config.target(target)?;
    let client = config.client()?;
    let report = client.get_gaps(&target.entity_id).await?;
    println!("{}", target.name);
    print!("{}", render::gaps(&report));
    Ok(())
}

pub async fn jobs(
    config: &AppConfig,
    status: Option<JobStatus>,
    page: PageArgs,
) -> anyhow::Result<()> {
    let client = config.client()?;
    let filter = JobFilter { status };
    let page = client.list_jobs(&filter, &page.into()).await?;
    print!("{}", render::jobs_table(&page.items));
    print_next_page(page.next_token.as_deref());
    Ok(())
}
