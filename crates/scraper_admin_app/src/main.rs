mod cli;
mod commands;
mod config;
mod logging;
mod render;

use clap::Parser;

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(
        cli.log_to,
        admin_logging::level_for_verbosity(cli.verbose),
    );

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(
        cli.api_url.clone(),
        cli.api_key.clone(),
    );
    commands::run(cli.command, &config).await
}
