use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// A loaded page the extractors read from.
///
/// Implemented by the headless Chrome tab and by the static HTML page the
/// HTTP engine produces. All waits block the calling thread.
pub trait Page {
    /// URL the page ended up on after redirects
    fn url(&self) -> String;

    fn title(&self) -> Result<String>;

    /// Current serialized DOM
    fn content(&self) -> Result<String>;

    fn wait_for_network_idle(&self) -> Result<()>;

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Fixed delay for client-side rendering to catch up
    fn pause(&self, duration: Duration);

    fn screenshot(&self, path: &Path) -> Result<()>;
}

/// Opens pages for the crawl driver
pub trait PageLoader: Send + Sync + 'static {
    type Handle: Page + 'static;

    /// Name used in logs
    fn engine_name(&self) -> &'static str;

    /// Navigate to `url`, failing if navigation takes longer than `timeout`
    fn open(&self, url: &str, timeout: Duration) -> Result<Self::Handle>;
}
