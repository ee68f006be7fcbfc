use crate::crawler::{CrawlContext, Request, RequestHandler};
use crate::filter::{self, RemoteRule};
use crate::models::Source;
use crate::scrapers::extract::{extract_listings, resolve_link, SelectorChain};
use crate::scrapers::types::{SiteSelectors, NOT_SPECIFIED};
use anyhow::Result;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, info};

const RESULT_LIST: &str = r#"[data-testid="jobsearch-JobList"], .jobsearch-ResultsList"#;
const RESULT_LIST_TIMEOUT: Duration = Duration::from_secs(30);
const NEXT_PAGE: &[&str] = &[r#"[aria-label="Next Page"]"#, r#".pagination a[aria-label="Next"]"#];

pub const INDEED: SiteSelectors = SiteSelectors {
    source: Source::Indeed,
    cards: &[".job_seen_beacon", ".result", ".job-card"],
    title: &[".jobTitle a", ".jcs-JobTitle span", r#"[data-testid="jobTitle"]"#],
    company: &[
        ".companyName",
        ".company_location .companyName",
        r#"[data-testid="company-name"]"#,
    ],
    location: &[
        ".companyLocation",
        ".company_location > div",
        r#"[data-testid="text-location"]"#,
    ],
    link: &[".jobTitle a", ".jcs-JobTitle a", "a[data-jk]"],
    default_company: NOT_SPECIFIED,
    default_location: "",
    remote_rule: RemoteRule {
        check_title: true,
        check_target: true,
    },
};

/// Indeed search result pages, following pagination
pub struct IndeedHandler;

impl IndeedHandler {
    pub const LABEL: &'static str = Source::Indeed.label();
}

/// Absolute URL of the next results page, if the page has one
fn next_page_url(html: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    SelectorChain::new(NEXT_PAGE)
        .attr_in_document(&document, "href")
        .and_then(|href| resolve_link(&href, page_url))
}

impl RequestHandler for IndeedHandler {
    fn handle(&self, ctx: &mut CrawlContext<'_>) -> Result<()> {
        info!(
            "Scraping Indeed jobs for {}",
            ctx.request.metadata.target_location
        );

        ctx.page.wait_for_network_idle()?;
        ctx.page.wait_for_selector(RESULT_LIST, RESULT_LIST_TIMEOUT)?;

        let html = ctx.page.content()?;
        let page_url = ctx.page.url();
        let listings = extract_listings(&html, &page_url, &INDEED);

        info!("Found {} potential job listings on Indeed", listings.len());

        for raw in listings {
            if let Some(job) = filter::accept(raw, &ctx.request.metadata, INDEED.remote_rule) {
                ctx.push_data(&job)?;
                info!("Saved job: {}", job.title);
            }
        }

        if let Some(next) = next_page_url(&html, &page_url) {
            debug!("Enqueueing next Indeed page {}", next);
            ctx.enqueue(Request::new(
                next,
                ctx.request.label.as_deref(),
                ctx.request.metadata.clone(),
            ));
        }

        Ok(())
    }
}
