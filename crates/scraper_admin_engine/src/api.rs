use serde_json::{json, Value};

use crate::graphql::GraphqlClient;
use crate::queries;
use crate::{
    ActionResult, ApiError, BulkUpdateResult, FetchedGame, GapReport, JobFilter, Overview,
    OverviewMetrics, Page, PageRequest, S3Content, S3Filter, S3Object, SaveGameInput,
    SaveGameResult, ScraperJob, ScraperSettings, SettingsUpdate, TimeWindow,
    TriggerScrapeResult, UrlFilter, UrlRecord, UrlRecordStatus,
};

const RECENT_JOBS_LIMIT: u32 = 10;

/// Calls made while scraping individual tournament IDs.
#[async_trait::async_trait]
pub trait ScrapeApi: Send + Sync {
    /// Point lookup by URL. `Ok(None)` when the backend has no record.
    async fn get_url_status(&self, url: &str) -> Result<Option<UrlRecord>, ApiError>;

    async fn trigger_scrape(
        &self,
        url: &str,
        force_refresh: bool,
    ) -> Result<TriggerScrapeResult, ApiError>;

    async fn fetch_game(&self, url: &str) -> Result<FetchedGame, ApiError>;

    async fn save_game(&self, input: &SaveGameInput) -> Result<SaveGameResult, ApiError>;
}

/// Listing, bulk-edit, storage and settings calls behind the admin panels.
#[async_trait::async_trait]
pub trait AdminApi: Send + Sync {
    async fn get_overview(&self, window: TimeWindow) -> Result<Overview, ApiError>;

    async fn get_gaps(&self, entity_id: &str) -> Result<GapReport, ApiError>;

    async fn list_jobs(
        &self,
        filter: &JobFilter,
        page: &PageRequest,
    ) -> Result<Page<ScraperJob>, ApiError>;

    async fn list_urls(
        &self,
        filter: &UrlFilter,
        page: &PageRequest,
    ) -> Result<Page<UrlRecord>, ApiError>;

    async fn bulk_update_url_status(
        &self,
        urls: &[String],
        status: UrlRecordStatus,
    ) -> Result<BulkUpdateResult, ApiError>;

    async fn set_do_not_scrape(&self, url: &str, do_not_scrape: bool)
        -> Result<UrlRecord, ApiError>;

    async fn list_s3_objects(
        &self,
        filter: &S3Filter,
        page: &PageRequest,
    ) -> Result<Page<S3Object>, ApiError>;

    async fn get_s3_content(&self, s3_key: &str) -> Result<S3Content, ApiError>;

    async fn delete_s3_object(&self, s3_key: &str) -> Result<ActionResult, ApiError>;

    /// Dispatches a re-parse of stored HTML; the backend does the work.
    async fn reparse_s3_object(&self, s3_key: &str) -> Result<ActionResult, ApiError>;

    async fn get_settings(&self) -> Result<ScraperSettings, ApiError>;

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<ScraperSettings, ApiError>;
}

fn page_variables(filter: Option<Value>, page: &PageRequest) -> Value {
    json!({
        "filter": filter,
        "limit": page.limit,
        "nextToken": page.next_token,
    })
}

#[async_trait::async_trait]
impl ScrapeApi for GraphqlClient {
    async fn get_url_status(&self, url: &str) -> Result<Option<UrlRecord>, ApiError> {
        self.execute(&queries::get_scrape_url(), json!({ "id": url }), "getScrapeURL")
            .await
    }

    async fn trigger_scrape(
        &self,
        url: &str,
        force_refresh: bool,
    ) -> Result<TriggerScrapeResult, ApiError> {
        self.execute(
            queries::TRIGGER_SCRAPE,
            json!({ "url": url, "forceRefresh": force_refresh }),
            "triggerScrape",
        )
        .await
    }

    async fn fetch_game(&self, url: &str) -> Result<FetchedGame, ApiError> {
        self.execute(
            queries::FETCH_TOURNAMENT_DATA,
            json!({ "url": url }),
            "fetchTournamentData",
        )
        .await
    }

    async fn save_game(&self, input: &SaveGameInput) -> Result<SaveGameResult, ApiError> {
        self.execute(
            queries::SAVE_TOURNAMENT_DATA,
            json!({ "input": input }),
            "saveTournamentData",
        )
        .await
    }
}

#[async_trait::async_trait]
impl AdminApi for GraphqlClient {
    async fn get_overview(&self, window: TimeWindow) -> Result<Overview, ApiError> {
        let metrics: OverviewMetrics = self
            .execute(
                queries::GET_SCRAPER_METRICS,
                json!({ "timeRange": window }),
                "getScraperMetrics",
            )
            .await?;
        let recent = self
            .list_jobs(
                &JobFilter::default(),
                &PageRequest {
                    limit: RECENT_JOBS_LIMIT,
                    next_token: None,
                },
            )
            .await?;
        Ok(Overview {
            metrics,
            recent_jobs: recent.items,
        })
    }

    async fn get_gaps(&self, entity_id: &str) -> Result<GapReport, ApiError> {
        self.execute(
            queries::GET_GAP_ANALYSIS,
            json!({ "entityId": entity_id }),
            "getGapAnalysis",
        )
        .await
    }

    async fn list_jobs(
        &self,
        filter: &JobFilter,
        page: &PageRequest,
    ) -> Result<Page<ScraperJob>, ApiError> {
        self.execute(
            &queries::list_scraper_jobs(),
            page_variables(filter.to_graphql(), page),
            "listScraperJobs",
        )
        .await
    }

    async fn list_urls(
        &self,
        filter: &UrlFilter,
        page: &PageRequest,
    ) -> Result<Page<UrlRecord>, ApiError> {
        self.execute(
            &queries::list_scrape_urls(),
            page_variables(filter.to_graphql(), page),
            "listScrapeURLs",
        )
        .await
    }

    async fn bulk_update_url_status(
        &self,
        urls: &[String],
        status: UrlRecordStatus,
    ) -> Result<BulkUpdateResult, ApiError> {
        self.execute(
            queries::BULK_UPDATE_URL_STATUS,
            json!({ "urls": urls, "status": status }),
            "bulkUpdateScrapeURLStatus",
        )
        .await
    }

    async fn set_do_not_scrape(
        &self,
        url: &str,
        do_not_scrape: bool,
    ) -> Result<UrlRecord, ApiError> {
        self.execute(
            &queries::update_scrape_url(),
            json!({ "input": { "id": url, "doNotScrape": do_not_scrape } }),
            "updateScrapeURL",
        )
        .await
    }

    async fn list_s3_objects(
        &self,
        filter: &S3Filter,
        page: &PageRequest,
    ) -> Result<Page<S3Object>, ApiError> {
        self.execute(
            queries::LIST_S3_STORAGE,
            page_variables(filter.to_graphql(), page),
            "listS3Storages",
        )
        .await
    }

    async fn get_s3_content(&self, s3_key: &str) -> Result<S3Content, ApiError> {
        self.execute(
            queries::GET_S3_CONTENT,
            json!({ "s3Key": s3_key }),
            "getS3Content",
        )
        .await
    }

    async fn delete_s3_object(&self, s3_key: &str) -> Result<ActionResult, ApiError> {
        self.execute(
            queries::DELETE_S3_OBJECT,
            json!({ "s3Key": s3_key }),
            "deleteS3Object",
        )
        .await
    }

    async fn reparse_s3_object(&self, s3_key: &str) -> Result<ActionResult, ApiError> {
        self.execute(
            queries::REPARSE_S3_OBJECT,
            json!({ "s3Key": s3_key }),
            "reparseS3Object",
        )
        .await
    }

    async fn get_settings(&self) -> Result<ScraperSettings, ApiError> {
        self.execute(
            &queries::get_scraper_settings(),
            json!({}),
            "getScraperSettings",
        )
        .await
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<ScraperSettings, ApiError> {
        self.execute(
            &queries::update_scraper_settings(),
            json!({ "input": update }),
            "updateScraperSettings",
        )
        .await
    }
}
