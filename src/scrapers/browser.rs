use crate::config::CrawlConfig;
use crate::scrapers::traits::{Page, PageLoader};
use anyhow::{Context, Result};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound on waiting for `document.readyState` to settle
const READY_STATE_TIMEOUT: Duration = Duration::from_secs(15);
const READY_STATE_POLL: Duration = Duration::from_millis(250);
/// Extra quiet period after the document reports complete, for late XHRs
const NETWORK_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Page engine backed by headless Chrome
pub struct ChromeLoader {
    browser: Browser,
}

impl ChromeLoader {
    /// Launch Chrome according to the crawl configuration
    pub fn launch(config: &CrawlConfig) -> Result<Self> {
        info!(
            "Launching {} Chrome...",
            if config.headless { "headless" } else { "headful" }
        );

        // The browser sits idle between requests while handlers run.
        let idle_timeout = config.navigation_timeout + config.request_handler_timeout;

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .idle_browser_timeout(idle_timeout)
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self { browser })
    }
}

impl PageLoader for ChromeLoader {
    type Handle = ChromePage;

    fn engine_name(&self) -> &'static str {
        "chrome"
    }

    fn open(&self, url: &str, timeout: Duration) -> Result<ChromePage> {
        let tab = self.browser.new_tab().context("Failed to open browser tab")?;
        tab.set_default_timeout(timeout);

        debug!("Navigating to {}", url);
        tab.navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        tab.wait_until_navigated()
            .with_context(|| format!("Navigation to {} did not finish", url))?;

        Ok(ChromePage { tab })
    }
}

/// One Chrome tab, closed when dropped
pub struct ChromePage {
    tab: Arc<Tab>,
}

impl ChromePage {
    fn ready_state(&self) -> Option<String> {
        let result = self.tab.evaluate("document.readyState", false).ok()?;
        result.value?.as_str().map(str::to_string)
    }
}

impl Page for ChromePage {
    fn url(&self) -> String {
        self.tab.get_url()
    }

    fn title(&self) -> Result<String> {
        self.tab.get_title().context("Failed to read page title")
    }

    fn content(&self) -> Result<String> {
        self.tab.get_content().context("Failed to read page HTML")
    }

    fn wait_for_network_idle(&self) -> Result<()> {
        self.tab.wait_until_navigated()?;

        let started = Instant::now();
        loop {
            if self.ready_state().as_deref() == Some("complete") {
                break;
            }
            if started.elapsed() > READY_STATE_TIMEOUT {
                warn!("Document never reported complete, reading it anyway");
                break;
            }
            thread::sleep(READY_STATE_POLL);
        }

        thread::sleep(NETWORK_QUIET_WINDOW);
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .with_context(|| format!("Timed out waiting for {}", selector))?;
        Ok(())
    }

    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }

    fn screenshot(&self, path: &Path) -> Result<()> {
        let png = self
            .tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .context("Failed to capture screenshot")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, png)
            .with_context(|| format!("Failed to write screenshot {}", path.display()))?;
        info!("Saved screenshot to {}", path.display());
        Ok(())
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            debug!("Failed to close tab: {}", e);
        }
    }
}
