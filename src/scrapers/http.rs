use crate::error::ScoutError;
use crate::scrapers::traits::{Page, PageLoader};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Page engine that fetches static HTML without running any JavaScript
#[derive(Debug, Default)]
pub struct HttpLoader;

impl HttpLoader {
    pub fn new() -> Self {
        Self
    }
}

impl PageLoader for HttpLoader {
    type Handle = StaticPage;

    fn engine_name(&self) -> &'static str {
        "http"
    }

    fn open(&self, url: &str, timeout: Duration) -> Result<StaticPage> {
        // Built per request: the blocking client owns a runtime that must not
        // be dropped on an async worker thread.
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        debug!("Fetching URL: {}", url);

        let response = client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            warn!("{} returned status: {}", url, response.status());
            anyhow::bail!("Failed to fetch {}: {}", url, response.status());
        }

        let final_url = response.url().to_string();
        let html = response.text().context("Failed to read response body")?;

        debug!("Downloaded {} bytes of HTML", html.len());

        Ok(StaticPage::new(final_url, html))
    }
}

/// A page that is nothing more than a fixed HTML document
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    html: String,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

impl Page for StaticPage {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> Result<String> {
        let document = Html::parse_document(&self.html);
        let selector = Selector::parse("title")
            .map_err(|e| anyhow::anyhow!("Invalid selector: {}", e))?;
        Ok(document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default())
    }

    fn content(&self) -> Result<String> {
        Ok(self.html.clone())
    }

    fn wait_for_network_idle(&self) -> Result<()> {
        Ok(())
    }

    fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> Result<()> {
        let parsed = Selector::parse(selector)
            .map_err(|e| anyhow::anyhow!("Invalid selector {}: {}", selector, e))?;
        let document = Html::parse_document(&self.html);
        if document.select(&parsed).next().is_none() {
            anyhow::bail!("Timed out waiting for {}", selector);
        }
        Ok(())
    }

    fn pause(&self, _duration: Duration) {}

    fn screenshot(&self, _path: &Path) -> Result<()> {
        Err(ScoutError::ScreenshotUnsupported("http").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
            <head><title> Product Manager jobs in Prague </title></head>
            <body><ul class="jobsearch-ResultsList"><li>one</li></ul></body>
        </html>
    "#;

    #[test]
    fn test_static_page_title() {
        let page = StaticPage::new("https://cz.indeed.com/jobs", PAGE);
        assert_eq!(page.title().unwrap(), "Product Manager jobs in Prague");
    }

    #[test]
    fn test_wait_for_selector_checks_static_html() {
        let page = StaticPage::new("https://cz.indeed.com/jobs", PAGE);
        let timeout = Duration::from_secs(30);

        assert!(page
            .wait_for_selector(
                r#"[data-testid="jobsearch-JobList"], .jobsearch-ResultsList"#,
                timeout,
            )
            .is_ok());
        assert!(page.wait_for_selector(".job_seen_beacon", timeout).is_err());
    }

    #[test]
    fn test_screenshot_is_unsupported() {
        let page = StaticPage::new("https://example.com", PAGE);
        let err = page.screenshot(Path::new("shot.png")).unwrap_err();
        assert!(err.downcast_ref::<ScoutError>().is_some());
    }
}
