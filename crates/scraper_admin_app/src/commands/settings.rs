use anyhow::bail;
use scraper_admin_engine::{AdminApi, SettingsUpdate};

use crate::cli::SettingsCommand;
use crate::config::AppConfig;
use crate::render;

pub async fn run(config: &AppConfig, command: SettingsCommand) -> anyhow::Result<()> {
    let client = config.client()?;
    let settings = match command {
        SettingsCommand::Show => client.get_settings().await?,
        SettingsCommand::Set {
            auto_refresh,
            interval_minutes,
            max_errors,
        } => {
            let update = SettingsUpdate {
                auto_refresh_enabled: auto_refresh,
                refresh_interval_minutes: interval_minutes,
                max_consecutive_errors: max_errors,
            };
            if update.is_empty() {
                bail!("nothing to change; pass --auto-refresh, --interval-minutes or --max-errors");
            }
            client.update_settings(&update).await?
        }
    };
    print!("{}", render::settings(&settings));
    Ok(())
}
