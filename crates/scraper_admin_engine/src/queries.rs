//! GraphQL documents sent to the scraping backend.

const URL_FIELDS: &str = "id url tournamentId entityId status doNotScrape gameId gameStatus \
     lastScrapedAt etag lastContentHash latestS3Key timesScraped";

const JOB_FIELDS: &str = "id status triggerSource startedAt finishedAt totalUrlsProcessed \
     newGamesScraped gamesUpdated errors";

const SETTINGS_FIELDS: &str =
    "autoRefreshEnabled refreshIntervalMinutes maxConsecutiveErrors updatedAt";

pub(crate) fn get_scrape_url() -> String {
    format!("query GetScrapeURL($id: ID!) {{ getScrapeURL(id: $id) {{ {URL_FIELDS} }} }}")
}

pub(crate) const TRIGGER_SCRAPE: &str = "mutation TriggerScrape($url: AWSURL!, $forceRefresh: Boolean) { \
     triggerScrape(url: $url, forceRefresh: $forceRefresh) { success name gameStatus message } }";

pub(crate) const FETCH_TOURNAMENT_DATA: &str = "mutation FetchTournamentData($url: AWSURL!) { \
     fetchTournamentData(url: $url) { name gameStatus data } }";

pub(crate) const SAVE_TOURNAMENT_DATA: &str =
    "mutation SaveTournamentData($input: SaveTournamentInput!) { \
     saveTournamentData(input: $input) { success gameId action message } }";

pub(crate) const BULK_UPDATE_URL_STATUS: &str =
    "mutation BulkUpdateScrapeURLStatus($urls: [ID!]!, $status: ScrapeURLStatus!) { \
     bulkUpdateScrapeURLStatus(urls: $urls, status: $status) { updated failed } }";

pub(crate) fn update_scrape_url() -> String {
    format!(
        "mutation UpdateScrapeURL($input: UpdateScrapeURLInput!) {{ \
         updateScrapeURL(input: $input) {{ {URL_FIELDS} }} }}"
    )
}

pub(crate) fn list_scraper_jobs() -> String {
    format!(
        "query ListScraperJobs($filter: ModelScraperJobFilterInput, $limit: Int, $nextToken: String) {{ \
         listScraperJobs(filter: $filter, limit: $limit, nextToken: $nextToken) {{ \
         items {{ {JOB_FIELDS} }} nextToken }} }}"
    )
}

pub(crate) fn list_scrape_urls() -> String {
    format!(
        "query ListScrapeURLs($filter: ModelScrapeURLFilterInput, $limit: Int, $nextToken: String) {{ \
         listScrapeURLs(filter: $filter, limit: $limit, nextToken: $nextToken) {{ \
         items {{ {URL_FIELDS} }} nextToken }} }}"
    )
}

pub(crate) const LIST_S3_STORAGE: &str =
    "query ListS3Storages($filter: ModelS3StorageFilterInput, $limit: Int, $nextToken: String) { \
     listS3Storages(filter: $filter, limit: $limit, nextToken: $nextToken) { \
     items { s3Key url tournamentId contentSize contentHash storedAt } nextToken } }";

pub(crate) const GET_S3_CONTENT: &str = "query GetS3Content($s3Key: String!) { \
     getS3Content(s3Key: $s3Key) { s3Key html contentType contentHash lastModified } }";

pub(crate) const DELETE_S3_OBJECT: &str = "mutation DeleteS3Object($s3Key: String!) { \
     deleteS3Object(s3Key: $s3Key) { success message } }";

pub(crate) const REPARSE_S3_OBJECT: &str = "mutation ReparseS3Object($s3Key: String!) { \
     reparseS3Object(s3Key: $s3Key) { success message } }";

pub(crate) const GET_SCRAPER_METRICS: &str =
    "query GetScraperMetrics($timeRange: TimeRange!) { getScraperMetrics(timeRange: $timeRange) { \
     totalJobs successfulJobs failedJobs totalUrls activeUrls doNotScrapeUrls cacheHits cacheMisses \
     averageJobDurationSeconds } }";

pub(crate) const GET_GAP_ANALYSIS: &str = "query GetGapAnalysis($entityId: ID!) { \
     getGapAnalysis(entityId: $entityId) { lowestId highestId totalGames coveragePercentage \
     gaps { start end count } } }";

pub(crate) fn get_scraper_settings() -> String {
    format!("query GetScraperSettings {{ getScraperSettings {{ {SETTINGS_FIELDS} }} }}")
}

pub(crate) fn update_scraper_settings() -> String {
    format!(
        "mutation UpdateScraperSettings($input: UpdateScraperSettingsInput!) {{ \
         updateScraperSettings(input: $input) {{ {SETTINGS_FIELDS} }} }}"
    )
}
