use anyhow::anyhow;
use scraper_admin_core::{update, AutoScrapeState, Msg};
use scraper_admin_engine::AutoScrapeRunner;

use super::{cancel_on_ctrl_c, finish_printer, spawn_event_printer};
use crate::cli::AutoArgs;
use crate::config::AppConfig;
use crate::render;

pub async fn run(config: &AppConfig, args: AutoArgs) -> anyhow::Result<()> {
    let target = config.target(&args.target)?;
    let client = config.client()?;
    let loop_config = config.loop_config(args.interval, args.no_cache)?;

    let state = AutoScrapeState::new();
    let (state, _) = update(state, Msg::TargetSelected(target));
    let (state, _) = update(state, Msg::ConfigChanged(loop_config));

    let cancel = cancel_on_ctrl_c();
    let (sink, printer) = spawn_event_printer();
    let result = AutoScrapeRunner::new(&client, &sink)
        .run(state, &args.start, &args.end, cancel)
        .await;
    finish_printer(sink, printer);

    let state = result.map_err(|err| anyhow!("cannot start auto scrape: {err}"))?;
    println!("{}", render::auto_summary(&state.view()));
    Ok(())
}
