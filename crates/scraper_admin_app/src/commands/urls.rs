use admin_logging::admin_warn;
use anyhow::bail;
use scraper_admin_core::PageSelection;
use scraper_admin_engine::{AdminApi, UrlFilter, UrlRecordStatus};

use super::print_next_page;
use crate::cli::{UrlFilterArgs, UrlsCommand};
use crate::config::AppConfig;
use crate::render;

impl From<UrlFilterArgs> for UrlFilter {
    fn from(args: UrlFilterArgs) -> Self {
        UrlFilter {
            status: args.status.map(Into::into),
            entity_id: args.entity,
            do_not_scrape: args.do_not_scrape,
        }
    }
}

pub async fn run(config: &AppConfig, command: UrlsCommand) -> anyhow::Result<()> {
    let client = config.client()?;
    match command {
        UrlsCommand::List { filter, page } => {
            let page = client.list_urls(&filter.into(), &page.into()).await?;
            print!("{}", render::urls_table(&page.items));
            print_next_page(page.next_token.as_deref());
        }
        UrlsCommand::SetStatus {
            status,
            filter,
            page,
            urls,
        } => {
            let page = client.list_urls(&filter.into(), &page.into()).await?;
            let mut selection = PageSelection::new();
            selection.load_page(page.items.into_iter().map(|record| record.url));
            for url in &urls {
                if !selection.select(url) {
                    admin_warn!("not on the loaded page, ignored: {}", url);
                    eprintln!("not on the loaded page: {url}");
                }
            }
            let status = UrlRecordStatus::from(status);
            let Some(request) = selection.bulk_status_request(status) else {
                bail!("none of the given URLs are on the loaded page");
            };
            let result = client
                .bulk_update_url_status(&request.ids, request.status)
                .await?;
            println!(
                "{} URLs set to {}, {} failed",
                result.updated, request.status, result.failed
            );
        }
        UrlsCommand::DoNotScrape { url, off } => {
            let record = client.set_do_not_scrape(&url, !off).await?;
            println!(
                "{}: do-not-scrape {}",
                record.url,
                if record.do_not_scrape { "on" } else { "off" }
            );
        }
    }
    Ok(())
}
