//! Shared in-memory backend for runner tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use scraper_admin_engine::{
    AdminEvent, ApiError, FetchedGame, ProgressSink, SaveGameInput, SaveGameResult, ScrapeApi,
    TriggerScrapeResult, UrlRecord,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
pub struct FakeBackend {
    pub records: HashMap<String, UrlRecord>,
    pub failing_checks: HashMap<String, ApiError>,
    pub failing_fetches: HashMap<String, ApiError>,
    pub rejected_saves: HashMap<String, String>,
    /// Cancels the token and hangs when this URL is scraped.
    pub hang_on_scrape: Option<(String, CancellationToken)>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn record(url: &str) -> UrlRecord {
        UrlRecord {
            id: url.to_string(),
            url: url.to_string(),
            tournament_id: None,
            entity_id: None,
            status: None,
            do_not_scrape: false,
            game_id: None,
            game_status: None,
            last_scraped_at: None,
            etag: None,
            last_content_hash: None,
            latest_s3_key: None,
            times_scraped: None,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ScrapeApi for FakeBackend {
    async fn get_url_status(&self, url: &str) -> Result<Option<UrlRecord>, ApiError> {
        self.log(format!("check {url}"));
        if let Some(err) = self.failing_checks.get(url) {
            return Err(err.clone());
        }
        Ok(self.records.get(url).cloned())
    }

    async fn trigger_scrape(
        &self,
        url: &str,
        force_refresh: bool,
    ) -> Result<TriggerScrapeResult, ApiError> {
        self.log(format!("scrape {url} force={force_refresh}"));
        if let Some((hang_url, token)) = &self.hang_on_scrape {
            if hang_url == url {
                token.cancel();
                std::future::pending::<()>().await;
            }
        }
        Ok(TriggerScrapeResult {
            success: true,
            name: Some("Weekly Freezeout".into()),
            game_status: Some("RUNNING".into()),
            message: None,
        })
    }

    async fn fetch_game(&self, url: &str) -> Result<FetchedGame, ApiError> {
        self.log(format!("fetch {url}"));
        if let Some(err) = self.failing_fetches.get(url) {
            return Err(err.clone());
        }
        Ok(FetchedGame {
            name: Some("Weekly Freezeout".into()),
            game_status: Some("SCHEDULED".into()),
            data: json!({ "url": url }),
        })
    }

    async fn save_game(&self, input: &SaveGameInput) -> Result<SaveGameResult, ApiError> {
        self.log(format!("save {}", input.source_url));
        if let Some(message) = self.rejected_saves.get(&input.source_url) {
            return Ok(SaveGameResult {
                success: false,
                game_id: None,
                action: None,
                message: Some(message.clone()),
            });
        }
        Ok(SaveGameResult {
            success: true,
            game_id: Some("game-1".into()),
            action: Some("CREATED".into()),
            message: None,
        })
    }
}

#[derive(Default, Clone)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<AdminEvent>>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<AdminEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: AdminEvent) {
        self.events.lock().unwrap().push(event);
    }
}
