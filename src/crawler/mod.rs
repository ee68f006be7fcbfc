pub mod context;
pub mod queue;
pub mod request;
pub mod router;

pub use context::{CancelToken, CrawlContext, PageOutcome};
pub use queue::RequestQueue;
pub use request::{Request, RequestMetadata};
pub use router::{job_router, DefaultHandler, RequestHandler, Router};

use crate::config::CrawlConfig;
use crate::error::ScoutError;
use crate::scrapers::{Page, PageLoader};
use crate::storage::Dataset;
use anyhow::{anyhow, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Counters reported at the end of a crawl
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlStats {
    pub requests_finished: usize,
    pub requests_failed: usize,
    pub retries: usize,
    pub listings_saved: usize,
}

impl CrawlStats {
    /// Requests that will not be attempted again
    pub fn handled(&self) -> usize {
        self.requests_finished + self.requests_failed
    }
}

/// Drives requests through the router one at a time
pub struct Crawler<L: PageLoader> {
    loader: Arc<L>,
    router: Arc<Router>,
    dataset: Arc<Dataset>,
    config: CrawlConfig,
}

impl<L: PageLoader> Crawler<L> {
    pub fn new(
        loader: L,
        router: Router,
        dataset: Arc<Dataset>,
        config: CrawlConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader: Arc::new(loader),
            router: Arc::new(router),
            dataset,
            config,
        })
    }

    pub async fn run(&self, seeds: Vec<Request>) -> Result<CrawlStats> {
        let mut queue = RequestQueue::new();
        for seed in seeds {
            queue.add(seed);
        }

        if queue.is_empty() {
            warn!("No requests to crawl");
        }
        info!(
            "Starting crawl of {} requests with the {} engine",
            queue.len(),
            self.loader.engine_name()
        );

        let mut stats = CrawlStats::default();

        while let Some(mut request) = queue.fetch_next() {
            if stats.handled() >= self.config.max_requests_per_crawl {
                warn!(
                    "Reached the limit of {} requests, {} left unprocessed",
                    self.config.max_requests_per_crawl,
                    queue.len() + 1
                );
                break;
            }

            match self.process(&request).await {
                Ok(outcome) => {
                    stats.requests_finished += 1;
                    stats.listings_saved += outcome.saved;
                    for derived in outcome.enqueued {
                        queue.add(derived);
                    }
                }
                Err(e) if request.retry_count < self.config.max_request_retries => {
                    request.retry_count += 1;
                    stats.retries += 1;
                    warn!(
                        "Request {} failed, retrying ({}/{}): {:#}",
                        request.url, request.retry_count, self.config.max_request_retries, e
                    );
                    queue.reclaim(request);
                }
                Err(e) => {
                    stats.requests_failed += 1;
                    error!(
                        "Request {} failed {} times, giving up: {:#}",
                        request.url,
                        request.retry_count + 1,
                        e
                    );
                }
            }
        }

        info!(
            "Crawl finished: {} requests finished, {} failed, {} retries, {} listings saved",
            stats.requests_finished, stats.requests_failed, stats.retries, stats.listings_saved
        );

        Ok(stats)
    }

    /// Load and handle one request on a blocking thread, bounded by the timeouts.
    ///
    /// A timed-out handler is cancelled and then awaited, so the next request
    /// never starts while it is still running.
    async fn process(&self, request: &Request) -> Result<PageOutcome> {
        let cancel = Arc::new(CancelToken::default());
        let navigation_timeout = self.config.navigation_timeout;
        let budget = navigation_timeout + self.config.request_handler_timeout;

        let mut task = tokio::task::spawn_blocking({
            let loader = Arc::clone(&self.loader);
            let router = Arc::clone(&self.router);
            let dataset = Arc::clone(&self.dataset);
            let cancel = Arc::clone(&cancel);
            let screenshot_dir = self.config.screenshot_dir.clone();
            let request = request.clone();
            move || {
                handle_page(
                    &*loader,
                    &router,
                    &dataset,
                    &request,
                    &cancel,
                    navigation_timeout,
                    screenshot_dir.as_deref(),
                )
            }
        });

        match tokio::time::timeout(budget, &mut task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(anyhow!("Request handler crashed: {}", join_error)),
            Err(_) => {
                // The blocking thread cannot be interrupted; stop it from writing.
                cancel.cancel();
                warn!(
                    "Request {} timed out after {:?}, waiting for its handler to stop",
                    request.url, budget
                );
                if let Err(join_error) = task.await {
                    warn!("Timed-out handler crashed: {}", join_error);
                }
                Err(ScoutError::HandlerTimeout {
                    url: request.url.clone(),
                    timeout: budget,
                }
                .into())
            }
        }
    }
}

fn handle_page<L: PageLoader>(
    loader: &L,
    router: &Router,
    dataset: &Dataset,
    request: &Request,
    cancel: &CancelToken,
    navigation_timeout: Duration,
    screenshot_dir: Option<&Path>,
) -> Result<PageOutcome> {
    let page = loader.open(&request.url, navigation_timeout)?;
    let mut ctx = CrawlContext::new(request, &page, dataset, cancel, screenshot_dir);

    let handler = router.route(request.label.as_deref());
    if let Err(e) = handler.handle(&mut ctx) {
        if let Some(dir) = screenshot_dir {
            capture_error_screenshot(&page, dir, request.label_or_default());
        }
        return Err(e);
    }

    Ok(ctx.into_outcome())
}

fn capture_error_screenshot(page: &dyn Page, dir: &Path, label: &str) {
    let path: PathBuf = dir.join(format!(
        "error-{}-{}.png",
        label.to_lowercase(),
        Utc::now().timestamp_millis()
    ));
    // best effort only
    if let Err(e) = page.screenshot(&path) {
        warn!("Could not capture error screenshot: {:#}", e);
    }
}
