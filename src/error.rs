use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Dataset directory not found: {}. Please run the crawler first.", .0.display())]
    DatasetMissing(PathBuf),

    #[error("Invalid crawl configuration: {0}")]
    InvalidConfig(String),

    #[error("Request handler for {url} timed out after {}s", .timeout.as_secs())]
    HandlerTimeout { url: String, timeout: Duration },

    #[error("Request for {0} was abandoned; data can no longer be pushed")]
    Cancelled(String),

    #[error("Screenshots are not supported by the {0} engine")]
    ScreenshotUnsupported(&'static str),
}
