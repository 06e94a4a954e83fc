//! Scraper admin engine: GraphQL client for the scraping backend and the
//! async drivers that execute core effects.
mod api;
mod auto_scrape;
mod bulk;
mod download;
mod fingerprint;
mod graphql;
mod persist;
mod progress;
mod queries;
mod types;

pub use api::{AdminApi, ScrapeApi};
pub use auto_scrape::AutoScrapeRunner;
pub use bulk::{run_bulk_scrape, BulkRunOptions};
pub use download::{download_s3_object, DownloadError, DownloadedObject};
pub use fingerprint::{fingerprint_matches, sha256_hex};
pub use graphql::{ClientSettings, GraphqlClient};
pub use persist::{download_filename, ensure_download_dir, DownloadWriter, PersistError};
pub use progress::{AdminEvent, ChannelProgressSink, ProgressSink};
pub use types::{
    ActionResult, ApiError, BulkUpdateResult, FetchedGame, Gap, GapReport, JobFilter, JobStatus,
    Overview, OverviewMetrics, Page, PageRequest, S3Content, S3Filter, S3Object, SaveGameInput,
    SaveGameResult, ScraperJob, ScraperSettings, SettingsUpdate, TimeWindow, TriggerScrapeResult,
    UrlFilter, UrlRecord, UrlRecordStatus,
};
