use crate::error::ScoutError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which page engine the crawler drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    /// Headless Chrome, renders client-side JavaScript
    Chrome,
    /// Plain HTTP fetch of the static HTML
    Http,
}

/// Crawl settings, fixed for the lifetime of a crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub engine: Engine,
    /// Requests in flight at once. Only sequential crawling is supported.
    pub max_concurrency: usize,
    /// Upper bound on handled requests (finished plus permanently failed)
    pub max_requests_per_crawl: usize,
    pub max_request_retries: u32,
    pub request_handler_timeout: Duration,
    pub navigation_timeout: Duration,
    pub headless: bool,
    pub storage_dir: PathBuf,
    /// Delete previous dataset records before crawling
    pub purge_on_start: bool,
    /// Where debug and error screenshots go; `None` disables them
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            engine: Engine::Chrome,
            max_concurrency: 1,
            max_requests_per_crawl: 20,
            max_request_retries: 1,
            request_handler_timeout: Duration::from_secs(90),
            navigation_timeout: Duration::from_secs(90),
            headless: true,
            storage_dir: PathBuf::from("storage"),
            purge_on_start: true,
            screenshot_dir: None,
        }
    }
}

impl CrawlConfig {
    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_max_requests(mut self, max_requests: usize) -> Self {
        self.max_requests_per_crawl = max_requests;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_request_retries = retries;
        self
    }

    pub fn with_timeouts(mut self, navigation: Duration, handler: Duration) -> Self {
        self.navigation_timeout = navigation;
        self.request_handler_timeout = handler;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    pub fn with_purge_on_start(mut self, purge: bool) -> Self {
        self.purge_on_start = purge;
        self
    }

    pub fn with_screenshot_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.screenshot_dir = dir;
        self
    }

    /// Directory holding one JSON file per accepted listing
    pub fn dataset_dir(&self) -> PathBuf {
        dataset_dir_in(&self.storage_dir)
    }

    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.max_concurrency != 1 {
            return Err(ScoutError::InvalidConfig(format!(
                "max_concurrency must be 1, got {}",
                self.max_concurrency
            )));
        }
        if self.max_requests_per_crawl == 0 {
            return Err(ScoutError::InvalidConfig(
                "max_requests_per_crawl must be at least 1".to_string(),
            ));
        }
        if self.request_handler_timeout.is_zero() || self.navigation_timeout.is_zero() {
            return Err(ScoutError::InvalidConfig(
                "timeouts must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn dataset_dir_in(storage_dir: &Path) -> PathBuf {
    storage_dir.join("datasets").join("default")
}

/// Settings for the offline merge pass
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub dataset_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            dataset_dir: dataset_dir_in(Path::new("storage")),
            output_path: PathBuf::from("jobs-data.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_requests_per_crawl, 20);
        assert_eq!(config.max_request_retries, 1);
        assert_eq!(
            config.dataset_dir(),
            PathBuf::from("storage").join("datasets").join("default")
        );
    }

    #[test]
    fn test_rejects_parallel_crawling() {
        let config = CrawlConfig {
            max_concurrency: 4,
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScoutError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_request_cap() {
        let config = CrawlConfig::default().with_max_requests(0);
        assert!(config.validate().is_err());
    }
}
