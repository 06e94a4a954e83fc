use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use admin_logging::admin_info;
use anyhow::{anyhow, bail, Context};
use scraper_admin_core::{LoopConfig, ScrapeTarget, DEFAULT_BATCH_SIZE};
use scraper_admin_engine::{ClientSettings, GraphqlClient};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = "scraper_admin.ron";
const MAX_CHECK_INTERVAL_SECS: f64 = 24.0 * 60.0 * 60.0;

/// A named entity whose tournament pages can be scraped by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub entity_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub url_prefix: String,
    #[serde(default)]
    pub url_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub check_interval_secs: f64,
    pub use_cache: bool,
    pub bulk_batch_size: usize,
    pub download_dir: PathBuf,
    pub targets: Vec<TargetConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let auto = LoopConfig::default();
        Self {
            api_url: None,
            api_key: None,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            check_interval_secs: auto.check_interval.as_secs_f64(),
            use_cache: auto.use_cache,
            bulk_batch_size: DEFAULT_BATCH_SIZE,
            download_dir: PathBuf::from("downloads"),
            targets: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads an explicit config file, or `./scraper_admin.ron` when present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };
        let config = Self::parse(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        admin_info!("loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Command-line and environment values win over the file.
    pub fn with_overrides(mut self, api_url: Option<String>, api_key: Option<String>) -> Self {
        if api_url.is_some() {
            self.api_url = api_url;
        }
        if api_key.is_some() {
            self.api_key = api_key;
        }
        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.bulk_batch_size == 0 {
            bail!("bulk_batch_size must be at least 1");
        }
        check_interval(self.check_interval_secs).context("check_interval_secs")?;
        for target in &self.targets {
            self.build_target(target)?;
        }
        Ok(())
    }

    pub fn client(&self) -> anyhow::Result<GraphqlClient> {
        let api_url = self.api_url.as_deref().ok_or_else(|| {
            anyhow!("no API URL configured; set api_url, --api-url or SCRAPER_ADMIN_API_URL")
        })?;
        let settings = ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::default()
        };
        Ok(GraphqlClient::new(api_url, self.api_key.clone(), settings)?)
    }

    pub fn target(&self, name: &str) -> anyhow::Result<ScrapeTarget> {
        let target = self
            .targets
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let known: Vec<&str> = self.targets.iter().map(|t| t.name.as_str()).collect();
                anyhow!("unknown target {name:?}; configured targets: {known:?}")
            })?;
        self.build_target(target)
    }

    fn build_target(&self, target: &TargetConfig) -> anyhow::Result<ScrapeTarget> {
        let display = target.display_name.as_deref().unwrap_or(&target.name);
        ScrapeTarget::new(
            target.entity_id.as_str(),
            display,
            target.url_prefix.as_str(),
            target.url_suffix.as_str(),
        )
        .with_context(|| format!("target {:?}", target.name))
    }

    pub fn loop_config(
        &self,
        interval_override: Option<f64>,
        no_cache: bool,
    ) -> anyhow::Result<LoopConfig> {
        let secs = interval_override.unwrap_or(self.check_interval_secs);
        Ok(LoopConfig {
            check_interval: check_interval(secs).context("--interval")?,
            use_cache: self.use_cache && !no_cache,
        })
    }
}

/// Seconds between auto-scrape IDs; at most one day.
fn check_interval(secs: f64) -> anyhow::Result<Duration> {
    if !(0.0..=MAX_CHECK_INTERVAL_SECS).contains(&secs) {
        bail!("interval must be between 0 and {MAX_CHECK_INTERVAL_SECS} seconds, got {secs}");
    }
    Ok(Duration::try_from_secs_f64(secs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"(
        api_url: Some("https://api.example.com/graphql"),
        check_interval_secs: 2.5,
        targets: [
            (
                name: "kings",
                entity_id: "ent-1",
                display_name: Some("Kings Room"),
                url_prefix: "https://kingsroom.example.com/tournament/?id=",
            ),
        ],
    )"#;

    #[test]
    fn parses_partial_file_with_defaults() {
        let config = AppConfig::parse(SAMPLE).unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://api.example.com/graphql")
        );
        assert_eq!(config.bulk_batch_size, DEFAULT_BATCH_SIZE);
        assert!(config.use_cache);

        let target = config.target("KINGS").unwrap();
        assert_eq!(target.name, "Kings Room");
        assert_eq!(
            target.url_for(7),
            "https://kingsroom.example.com/tournament/?id=7"
        );
    }

    #[test]
    fn unknown_target_lists_known_ones() {
        let config = AppConfig::parse(SAMPLE).unwrap();
        let err = config.target("other").unwrap_err().to_string();
        assert!(err.contains("kings"));
    }

    #[test]
    fn rejects_bad_target_prefix() {
        let content = r#"(targets: [(name: "x", entity_id: "e", url_prefix: "not a url")])"#;
        assert!(AppConfig::parse(content).is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = AppConfig::parse(SAMPLE)
            .unwrap()
            .with_overrides(Some("https://other.example.com/graphql".into()), None);
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://other.example.com/graphql")
        );
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn loop_config_honours_flags() {
        let config = AppConfig::parse(SAMPLE).unwrap();
        let auto = config.loop_config(None, false).unwrap();
        assert_eq!(auto.check_interval, Duration::from_millis(2500));
        assert!(auto.use_cache);

        let auto = config.loop_config(Some(0.0), true).unwrap();
        assert_eq!(auto.check_interval, Duration::ZERO);
        assert!(!auto.use_cache);
    }

    #[test]
    fn out_of_range_interval_override_is_an_error() {
        let config = AppConfig::parse(SAMPLE).unwrap();
        for secs in [f64::INFINITY, f64::NAN, 1e20, -1.0] {
            let err = config.loop_config(Some(secs), false).unwrap_err();
            assert!(format!("{err:#}").contains("interval"), "{secs}: {err:#}");
        }
        assert!(config.loop_config(Some(86_400.0), false).is_ok());
    }

    #[test]
    fn out_of_range_interval_in_file_is_rejected() {
        assert!(AppConfig::parse("(check_interval_secs: 1e30)").is_err());
        assert!(AppConfig::parse("(check_interval_secs: -2.0)").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&temp.path().join("nope.ron"))).is_err());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("admin.ron");
        fs::write(&path, SAMPLE).unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.targets.len(), 1);
    }

    #[test]
    fn client_requires_api_url() {
        assert!(AppConfig::default().client().is_err());
    }
}
