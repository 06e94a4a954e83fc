mod auto;
mod overview;
mod s3;
mod scrape;
mod settings;
mod urls;

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use admin_logging::admin_warn;
use scraper_admin_engine::{AdminEvent, ChannelProgressSink, PageRequest};
use tokio_util::sync::CancellationToken;

use crate::cli::{Command, PageArgs};
use crate::config::AppConfig;
use crate::render;

pub async fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Overview { window } => overview::overview(config, window.into()).await,
        Command::Gaps { target } => overview::gaps(config, &target).await,
        Command::Scrape { target, id, venue } => scrape::single(config, &target, id, venue).await,
        Command::Bulk(args) => scrape::bulk(config, args).await,
        Command::Auto(args) => auto::run(config, args).await,
        Command::Jobs { status, page } => overview::jobs(config, status.map(Into::into), page).await,
        Command::Urls(command) => urls::run(config, command).await,
        Command::S3(command) => s3::run(config, command).await,
        Command::Settings(command) => settings::run(config, command).await,
    }
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest {
            limit: args.limit,
            next_token: args.next_token,
        }
    }
}

/// Token cancelled by the first Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                eprintln!("stopping...");
                child.cancel();
            }
            Err(err) => admin_warn!("cannot listen for Ctrl-C: {}", err),
        }
    });
    token
}

/// Prints progress events on a background thread until every sender is gone.
fn spawn_event_printer() -> (ChannelProgressSink, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel::<AdminEvent>();
    let handle = thread::spawn(move || {
        let mut last_checked = None;
        for event in rx {
            match event {
                AdminEvent::Log(entry) => println!("{}", render::log_line(&entry)),
                AdminEvent::Stats {
                    current_id,
                    stats,
                    cache_hit_rate,
                    ..
                } => {
                    if last_checked != Some(stats.total_checked) {
                        last_checked = Some(stats.total_checked);
                        println!("{}", render::stats_line(current_id, &stats, cache_hit_rate));
                    }
                }
                AdminEvent::BulkItem { id, status } => {
                    println!("{}", render::bulk_item_line(id, &status));
                }
            }
        }
    });
    (ChannelProgressSink::new(tx), handle)
}

fn finish_printer(sink: ChannelProgressSink, handle: JoinHandle<()>) {
    drop(sink);
    if handle.join().is_err() {
        admin_warn!("progress printer thread panicked");
    }
}

fn print_next_page(next_token: Option<&str>) {
    if let Some(hint) = render::next_page_hint(next_token) {
        println!("{hint}");
    }
}
