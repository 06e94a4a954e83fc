//! Plain-text formatting for command output.
use chrono::{DateTime, Local, Utc};
use scraper_admin_core::{
    AutoScrapeView, BulkSummary, GameId, ItemStatus, LogEntry, LogSeverity, RunStats,
};
use scraper_admin_engine::{
    GapReport, Overview, S3Object, ScraperJob, ScraperSettings, UrlRecord,
};

const NONE: &str = "-";

pub fn timestamp(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NONE.to_string(),
    }
}

pub fn severity_tag(severity: LogSeverity) -> &'static str {
    match severity {
        LogSeverity::Info => "INFO",
        LogSeverity::Success => " OK ",
        LogSeverity::Warning => "WARN",
        LogSeverity::Error => "FAIL",
    }
}

pub fn log_line(entry: &LogEntry) -> String {
    format!(
        "{} [{}] {}",
        entry.timestamp.with_timezone(&Local).format("%H:%M:%S"),
        severity_tag(entry.severity),
        entry.message
    )
}

pub fn stats_line(current_id: Option<GameId>, stats: &RunStats, cache_hit_rate: u8) -> String {
    let current = current_id.map_or_else(|| NONE.to_string(), |id| id.to_string());
    format!(
        "at {current} | checked {} | scraped {} | skipped {} | errors {} | cache hits {}%",
        stats.total_checked,
        stats.scraped,
        stats.skipped(),
        stats.errors,
        cache_hit_rate
    )
}

pub fn auto_summary(view: &AutoScrapeView) -> String {
    let s = &view.stats;
    let mut out = String::new();
    out.push_str(&format!(
        "Auto scrape {:?} for {} ({}% of range)\n",
        view.phase,
        view.target_name.as_deref().unwrap_or(NONE),
        view.progress_percent
    ));
    out.push_str(&format!("  checked            {}\n", s.total_checked));
    out.push_str(&format!("  scraped            {}\n", s.scraped));
    out.push_str(&format!("  skipped finished   {}\n", s.skipped_finished));
    out.push_str(&format!("  skipped blocked    {}\n", s.skipped_do_not_scrape));
    out.push_str(&format!("  skipped unchanged  {}\n", s.skipped_no_updates));
    out.push_str(&format!("  errors             {}\n", s.errors));
    out.push_str(&format!(
        "  cache hits/misses  {}/{} ({}%)",
        s.cache_hits, s.cache_misses, view.cache_hit_rate
    ));
    out
}

pub fn bulk_item_line(id: GameId, status: &ItemStatus) -> String {
    match status {
        ItemStatus::Error(message) => format!("{id:>10}  {:<8}  {message}", status.label()),
        other => format!("{id:>10}  {}", other.label()),
    }
}

pub fn bulk_summary(summary: &BulkSummary) -> String {
    format!(
        "{} IDs: {} saved, {} skipped, {} failed, {} not run",
        summary.total(),
        summary.success,
        summary.skipped,
        summary.error,
        summary.pending + summary.in_progress
    )
}

pub fn overview(overview: &Overview) -> String {
    let m = &overview.metrics;
    let mut out = String::new();
    out.push_str(&format!(
        "Jobs       {} total, {} succeeded, {} failed\n",
        m.total_jobs, m.successful_jobs, m.failed_jobs
    ));
    out.push_str(&format!(
        "URLs       {} total, {} active, {} do-not-scrape\n",
        m.total_urls, m.active_urls, m.do_not_scrape_urls
    ));
    out.push_str(&format!(
        "Cache      {} hits, {} misses\n",
        m.cache_hits, m.cache_misses
    ));
    if let Some(secs) = m.average_job_duration_seconds {
        out.push_str(&format!("Avg job    {secs:.1}s\n"));
    }
    out.push_str("\nRecent jobs\n");
    out.push_str(&jobs_table(&overview.recent_jobs));
    out
}

pub fn gaps(report: &GapReport) -> String {
    let id = |v: Option<u64>| v.map_or_else(|| NONE.to_string(), |v| v.to_string());
    let mut out = format!(
        "IDs {}..{}, {} games, {:.1}% coverage\n",
        id(report.lowest_id),
        id(report.highest_id),
        report.total_games,
        report.coverage_percentage
    );
    if report.gaps.is_empty() {
        out.push_str("no gaps\n");
    }
    for gap in &report.gaps {
        if gap.start == gap.end {
            out.push_str(&format!("  missing {}\n", gap.start));
        } else {
            out.push_str(&format!(
                "  missing {}-{} ({} IDs)\n",
                gap.start, gap.end, gap.count
            ));
        }
    }
    out
}

pub fn jobs_table(jobs: &[ScraperJob]) -> String {
    if jobs.is_empty() {
        return "no jobs\n".to_string();
    }
    let mut out = format!(
        "{:<38} {:<10} {:<12} {:<19} {:>6} {:>5} {:>7} {:>6}\n",
        "ID", "STATUS", "SOURCE", "STARTED", "URLS", "NEW", "UPDATED", "ERRORS"
    );
    for job in jobs {
        out.push_str(&format!(
            "{:<38} {:<10} {:<12} {:<19} {:>6} {:>5} {:>7} {:>6}\n",
            job.id,
            job.status.to_string(),
            job.trigger_source.as_deref().unwrap_or(NONE),
            timestamp(job.started_at),
            job.total_urls_processed,
            job.new_games_scraped,
            job.games_updated,
            job.errors
        ));
    }
    out
}

pub fn urls_table(urls: &[UrlRecord]) -> String {
    if urls.is_empty() {
        return "no URLs\n".to_string();
    }
    let mut out = format!(
        "{:<14} {:<3} {:<10} {:<19} {}\n",
        "STATUS", "DNS", "GAME", "LAST SCRAPED", "URL"
    );
    for record in urls {
        let status = record
            .status
            .map_or_else(|| NONE.to_string(), |s| s.to_string());
        out.push_str(&format!(
            "{:<14} {:<3} {:<10} {:<19} {}\n",
            status,
            if record.do_not_scrape { "yes" } else { "" },
            record.game_status.as_deref().unwrap_or(NONE),
            timestamp(record.last_scraped_at),
            record.url
        ));
    }
    out
}

pub fn s3_table(objects: &[S3Object]) -> String {
    if objects.is_empty() {
        return "no objects\n".to_string();
    }
    let mut out = format!("{:>10} {:>10} {:<19} {}\n", "ID", "BYTES", "STORED", "KEY");
    for object in objects {
        let id = object
            .tournament_id
            .map_or_else(|| NONE.to_string(), |id| id.to_string());
        let size = object
            .content_size
            .map_or_else(|| NONE.to_string(), |size| size.to_string());
        out.push_str(&format!(
            "{:>10} {:>10} {:<19} {}\n",
            id,
            size,
            timestamp(object.stored_at),
            object.s3_key
        ));
    }
    out
}

pub fn settings(settings: &ScraperSettings) -> String {
    let opt = |v: Option<u32>| v.map_or_else(|| NONE.to_string(), |v| v.to_string());
    format!(
        "auto refresh        {}\nrefresh interval    {} min\nmax errors          {}\nupdated             {}\n",
        if settings.auto_refresh_enabled { "on" } else { "off" },
        opt(settings.refresh_interval_minutes),
        opt(settings.max_consecutive_errors),
        timestamp(settings.updated_at)
    )
}

pub fn next_page_hint(next_token: Option<&str>) -> Option<String> {
    next_token.map(|token| format!("more results: --next-token {token}"))
}
