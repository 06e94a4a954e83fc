use std::fmt;

use chrono::{DateTime, Utc};
use scraper_admin_core::{ScrapeReport, UrlStatus};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("http status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("graphql error: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("response has no data for {0}")]
    MissingData(String),
}

impl ApiError {
    /// Transport-level failures; the backend never saw or never answered the call.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlRecordStatus {
    Active,
    Inactive,
    DoNotScrape,
    Error,
    Archived,
}

impl fmt::Display for UrlRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UrlRecordStatus::Active => "ACTIVE",
            UrlRecordStatus::Inactive => "INACTIVE",
            UrlRecordStatus::DoNotScrape => "DO_NOT_SCRAPE",
            UrlRecordStatus::Error => "ERROR",
            UrlRecordStatus::Archived => "ARCHIVED",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    Timeout,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Running => "RUNNING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Cancelled => "CANCELLED",
            JobStatus::Timeout => "TIMEOUT",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "LAST_HOUR")]
    LastHour,
    #[serde(rename = "LAST_24_HOURS")]
    Last24Hours,
    #[serde(rename = "LAST_7_DAYS")]
    Last7Days,
    #[serde(rename = "LAST_30_DAYS")]
    Last30Days,
}

/// A tracked tournament URL as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub tournament_id: Option<u64>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub status: Option<UrlRecordStatus>,
    #[serde(default)]
    pub do_not_scrape: bool,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub game_status: Option<String>,
    #[serde(default)]
    pub last_scraped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub last_content_hash: Option<String>,
    #[serde(default)]
    pub latest_s3_key: Option<String>,
    #[serde(default)]
    pub times_scraped: Option<u32>,
}

impl From<UrlRecord> for UrlStatus {
    fn from(record: UrlRecord) -> Self {
        UrlStatus {
            do_not_scrape: record.do_not_scrape
                || record.status == Some(UrlRecordStatus::DoNotScrape),
            game_status: record.game_status,
            last_scraped_at: record.last_scraped_at,
            etag: record.etag,
            content_hash: record.last_content_hash,
            cache_key: record.latest_s3_key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerScrapeResult {
    pub success: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub game_status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<TriggerScrapeResult> for ScrapeReport {
    fn from(result: TriggerScrapeResult) -> Self {
        ScrapeReport {
            success: result.success,
            name: result.name,
            status: result.game_status,
            message: result.message,
        }
    }
}

/// Parsed tournament page, not yet persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedGame {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub game_status: Option<String>,
    #[serde(default, deserialize_with = "aws_json")]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameInput {
    pub source_url: String,
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    /// Sent as an AWSJSON string.
    #[serde(serialize_with = "aws_json_string")]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameResult {
    pub success: bool,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResult {
    pub updated: u32,
    #[serde(default)]
    pub failed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperJob {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub trigger_source: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_urls_processed: u32,
    #[serde(default)]
    pub new_games_scraped: u32,
    #[serde(default)]
    pub games_updated: u32,
    #[serde(default)]
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Object {
    pub s3_key: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tournament_id: Option<u64>,
    #[serde(default)]
    pub content_size: Option<u64>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub stored_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Content {
    pub s3_key: String,
    pub html: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub successful_jobs: u64,
    #[serde(default)]
    pub failed_jobs: u64,
    #[serde(default)]
    pub total_urls: u64,
    #[serde(default)]
    pub active_urls: u64,
    #[serde(default)]
    pub do_not_scrape_urls: u64,
    #[serde(default)]
    pub cache_hits: u64,
    #[serde(default)]
    pub cache_misses: u64,
    #[serde(default)]
    pub average_job_duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub metrics: OverviewMetrics,
    pub recent_jobs: Vec<ScraperJob>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Gap {
    pub start: u64,
    pub end: u64,
    pub count: u64,
}

/// Coverage computed by the backend; rendered as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    #[serde(default)]
    pub lowest_id: Option<u64>,
    #[serde(default)]
    pub highest_id: Option<u64>,
    #[serde(default)]
    pub total_games: u64,
    #[serde(default)]
    pub coverage_percentage: f64,
    #[serde(default)]
    pub gaps: Vec<Gap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperSettings {
    pub auto_refresh_enabled: bool,
    #[serde(default)]
    pub refresh_interval_minutes: Option<u32>,
    #[serde(default)]
    pub max_consecutive_errors: Option<u32>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial settings write; unset fields are left alone by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_consecutive_errors: Option<u32>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self == &SettingsUpdate::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub next_token: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 50,
            next_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlFilter {
    pub status: Option<UrlRecordStatus>,
    pub entity_id: Option<String>,
    pub do_not_scrape: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct S3Filter {
    pub entity_id: Option<String>,
    pub tournament_id: Option<u64>,
}

impl JobFilter {
    pub(crate) fn to_graphql(&self) -> Option<Value> {
        let mut filter = Map::new();
        if let Some(status) = self.status {
            filter.insert("status".into(), json!({ "eq": status }));
        }
        non_empty(filter)
    }
}

impl UrlFilter {
    pub(crate) fn to_graphql(&self) -> Option<Value> {
        let mut filter = Map::new();
        if let Some(status) = self.status {
            filter.insert("status".into(), json!({ "eq": status }));
        }
        if let Some(entity_id) = &self.entity_id {
            filter.insert("entityId".into(), json!({ "eq": entity_id }));
        }
        if let Some(flag) = self.do_not_scrape {
            filter.insert("doNotScrape".into(), json!({ "eq": flag }));
        }
        non_empty(filter)
    }
}

impl S3Filter {
    pub(crate) fn to_graphql(&self) -> Option<Value> {
        let mut filter = Map::new();
        if let Some(entity_id) = &self.entity_id {
            filter.insert("entityId".into(), json!({ "eq": entity_id }));
        }
        if let Some(id) = self.tournament_id {
            filter.insert("tournamentId".into(), json!({ "eq": id }));
        }
        non_empty(filter)
    }
}

fn non_empty(filter: Map<String, Value>) -> Option<Value> {
    if filter.is_empty() {
        None
    } else {
        Some(Value::Object(filter))
    }
}

/// AWSJSON fields arrive as JSON-encoded strings; accept either form.
fn aws_json<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(text) => serde_json::from_str(&text).map_err(serde::de::Error::custom),
        other => Ok(other),
    }
}

fn aws_json_string<S>(value: &Value, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_record_maps_to_status() {
        let record: UrlRecord = serde_json::from_value(json!({
            "id": "https://example.com/?id=5",
            "url": "https://example.com/?id=5",
            "status": "DO_NOT_SCRAPE",
            "gameStatus": "RUNNING",
            "lastScrapedAt": "2024-05-01T10:00:00.000Z",
            "etag": "\"abc\"",
            "latestS3Key": "html/5.html"
        }))
        .unwrap();
        let status = UrlStatus::from(record);
        assert!(status.do_not_scrape);
        assert_eq!(status.cache_key.as_deref(), Some("html/5.html"));
        assert!(status.last_scraped_at.is_some());
    }

    #[test]
    fn fetched_game_accepts_stringified_json() {
        let game: FetchedGame = serde_json::from_value(json!({
            "name": "Sunday Special",
            "data": "{\"buyIn\":55}"
        }))
        .unwrap();
        assert_eq!(game.data["buyIn"], 55);
    }

    #[test]
    fn filters_skip_unset_fields() {
        assert_eq!(UrlFilter::default().to_graphql(), None);
        let filter = UrlFilter {
            status: Some(UrlRecordStatus::Inactive),
            do_not_scrape: Some(false),
            ..UrlFilter::default()
        };
        assert_eq!(
            filter.to_graphql(),
            Some(json!({ "status": { "eq": "INACTIVE" }, "doNotScrape": { "eq": false } }))
        );
    }

    #[test]
    fn only_network_and_timeout_count_as_transport() {
        assert!(ApiError::Timeout.is_transport());
        assert!(ApiError::Network("reset".into()).is_transport());
        assert!(!ApiError::Graphql(vec!["denied".into()]).is_transport());
        assert!(!ApiError::HttpStatus {
            status: 500,
            body: String::new()
        }
        .is_transport());
    }

    #[test]
    fn settings_update_sends_only_set_fields() {
        let update = SettingsUpdate {
            auto_refresh_enabled: Some(false),
            ..SettingsUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "autoRefreshEnabled": false })
        );
        assert!(SettingsUpdate::default().is_empty());
    }
}
