use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scraper_admin_engine::{JobStatus, TimeWindow, UrlRecordStatus};

use crate::logging::LogDestination;

/// Operator console for the tournament scraping backend.
#[derive(Debug, Parser)]
#[command(name = "scraper-admin", version, about)]
pub struct Cli {
    /// RON config file (default: ./scraper_admin.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// GraphQL endpoint of the scraping backend.
    #[arg(long, global = true, env = "SCRAPER_ADMIN_API_URL")]
    pub api_url: Option<String>,

    /// API key sent as `x-api-key`.
    #[arg(long, global = true, env = "SCRAPER_ADMIN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Where log records go; `file` and `both` write ./scraper_admin.log.
    #[arg(long, global = true, value_enum, default_value_t = LogDestination::Terminal)]
    pub log_to: LogDestination,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate metrics and the most recent jobs.
    Overview {
        #[arg(long, value_enum, default_value_t = WindowArg::Day)]
        window: WindowArg,
    },
    /// Missing-ID ranges and coverage for a target, as computed by the backend.
    Gaps {
        #[arg(long)]
        target: String,
    },
    /// Fetch and save a single tournament ID.
    Scrape {
        #[arg(long)]
        target: String,
        #[arg(long)]
        id: u64,
        #[arg(long)]
        venue: Option<String>,
    },
    /// Fetch and save every ID of a range in small parallel batches.
    Bulk(BulkArgs),
    /// Walk a range on a timer, scraping only IDs the backend says need it.
    Auto(AutoArgs),
    /// Scraper job history.
    Jobs {
        #[arg(long, value_enum)]
        status: Option<JobStatusArg>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Tracked URL records.
    #[command(subcommand)]
    Urls(UrlsCommand),
    /// Cached HTML objects in S3.
    #[command(subcommand)]
    S3(S3Command),
    /// Global auto-refresh settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Args)]
pub struct BulkArgs {
    #[arg(long)]
    pub target: String,
    #[arg(long)]
    pub start: String,
    #[arg(long)]
    pub end: String,
    /// IDs processed concurrently per batch (config default when unset).
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Skip IDs whose game record already exists.
    #[arg(long)]
    pub skip_existing: bool,
    #[arg(long)]
    pub venue: Option<String>,
}

#[derive(Debug, Args)]
pub struct AutoArgs {
    #[arg(long)]
    pub target: String,
    #[arg(long)]
    pub start: String,
    #[arg(long)]
    pub end: String,
    /// Seconds between IDs (config default when unset).
    #[arg(long)]
    pub interval: Option<f64>,
    /// Bypass cached HTML and force live fetches.
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
    /// Cursor printed by the previous page.
    #[arg(long)]
    pub next_token: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum UrlsCommand {
    List {
        #[command(flatten)]
        filter: UrlFilterArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Apply one status to the given URLs of the loaded page in a single call.
    SetStatus {
        #[arg(long, value_enum)]
        status: UrlStatusArg,
        #[command(flatten)]
        filter: UrlFilterArgs,
        #[command(flatten)]
        page: PageArgs,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Set or clear the do-not-scrape flag on one URL.
    DoNotScrape {
        url: String,
        #[arg(long)]
        off: bool,
    },
}

#[derive(Debug, Args)]
pub struct UrlFilterArgs {
    /// Only list records with this status.
    #[arg(id = "filter_status", long = "filter-status", value_enum)]
    pub status: Option<UrlStatusArg>,
    #[arg(long)]
    pub entity: Option<String>,
    #[arg(long)]
    pub do_not_scrape: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum S3Command {
    List {
        #[arg(long)]
        entity: Option<String>,
        #[arg(long)]
        tournament_id: Option<u64>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Print stored HTML to stdout.
    View { key: String },
    /// Save stored HTML to disk and verify its hash.
    Download {
        key: String,
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    Delete {
        key: String,
        /// Required; deletion cannot be undone.
        #[arg(long)]
        yes: bool,
    },
    /// Ask the backend to re-parse stored HTML.
    Reparse { key: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        auto_refresh: Option<bool>,
        #[arg(long)]
        interval_minutes: Option<u32>,
        #[arg(long)]
        max_errors: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    Hour,
    Day,
    Week,
    Month,
}

impl From<WindowArg> for TimeWindow {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Hour => TimeWindow::LastHour,
            WindowArg::Day => TimeWindow::Last24Hours,
            WindowArg::Week => TimeWindow::Last7Days,
            WindowArg::Month => TimeWindow::Last30Days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JobStatusArg {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    Timeout,
}

impl From<JobStatusArg> for JobStatus {
    fn from(arg: JobStatusArg) -> Self {
        match arg {
            JobStatusArg::Queued => JobStatus::Queued,
            JobStatusArg::Running => JobStatus::Running,
            JobStatusArg::Completed => JobStatus::Completed,
            JobStatusArg::Failed => JobStatus::Failed,
            JobStatusArg::Cancelled => JobStatus::Cancelled,
            JobStatusArg::Timeout => JobStatus::Timeout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UrlStatusArg {
    Active,
    Inactive,
    DoNotScrape,
    Error,
    Archived,
}

impl From<UrlStatusArg> for UrlRecordStatus {
    fn from(arg: UrlStatusArg) -> Self {
        match arg {
            UrlStatusArg::Active => UrlRecordStatus::Active,
            UrlStatusArg::Inactive => UrlRecordStatus::Inactive,
            UrlStatusArg::DoNotScrape => UrlRecordStatus::DoNotScrape,
            UrlStatusArg::Error => UrlRecordStatus::Error,
            UrlStatusArg::Archived => UrlRecordStatus::Archived,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn auto_accepts_raw_range_text() {
        let cli = Cli::try_parse_from([
            "scraper-admin",
            "auto",
            "--target",
            "kings",
            "--start",
            "10",
            "--end",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::Auto(args) => {
                assert_eq!(args.start, "10");
                assert_eq!(args.end, "5");
                assert!(!args.no_cache);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_to, LogDestination::Terminal);
    }

    #[test]
    fn url_status_filter_and_target_status_are_distinct() {
        let cli = Cli::try_parse_from([
            "scraper-admin",
            "urls",
            "set-status",
            "--status",
            "inactive",
            "--filter-status",
            "active",
            "https://example.com/?id=1",
        ])
        .unwrap();
        match cli.command {
            Command::Urls(UrlsCommand::SetStatus {
                status,
                filter,
                urls,
                ..
            }) => {
                assert_eq!(status, UrlStatusArg::Inactive);
                assert_eq!(filter.status, Some(UrlStatusArg::Active));
                assert_eq!(urls, vec!["https://example.com/?id=1".to_string()]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
