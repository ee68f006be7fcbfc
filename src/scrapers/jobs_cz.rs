use crate::crawler::{CrawlContext, RequestHandler};
use crate::filter::{self, RemoteRule};
use crate::models::Source;
use crate::scrapers::extract::{extract_listings, SelectorChain};
use crate::scrapers::types::{SiteSelectors, NOT_SPECIFIED};
use anyhow::Result;
use scraper::Html;
use tracing::{info, warn};

pub const JOBS_CZ: SiteSelectors = SiteSelectors {
    source: Source::JobsCz,
    cards: &[".offer", ".search-result", ".job-card"],
    title: &["h2", ".title", ".job-title"],
    company: &[".company", ".employer", ".job-company"],
    location: &[".location", ".address", ".job-location"],
    link: &["a"],
    default_company: NOT_SPECIFIED,
    // the only Jobs.cz search is scoped to Prague
    default_location: "Prague",
    remote_rule: RemoteRule {
        check_title: true,
        check_target: false,
    },
};

/// Jobs.cz search result pages
pub struct JobsCzHandler;

impl JobsCzHandler {
    pub const LABEL: &'static str = Source::JobsCz.label();
}

/// Whether the page has any of the listing containers Jobs.cz is known to use
fn has_offers(document: &Html) -> bool {
    let offers = SelectorChain::new(&[".offer"]);
    if !offers.select_first_matching(document).is_empty() {
        return true;
    }
    warn!("No job listings found on Jobs.cz using the .offer selector");

    let alternatives = SelectorChain::new(&[".search-result"]);
    !alternatives.select_first_matching(document).is_empty()
}

impl RequestHandler for JobsCzHandler {
    fn handle(&self, ctx: &mut CrawlContext<'_>) -> Result<()> {
        info!(
            "Scraping Jobs.cz for {}",
            ctx.request.metadata.target_location
        );

        ctx.page.wait_for_network_idle()?;

        let html = ctx.page.content()?;
        if !has_offers(&Html::parse_document(&html)) {
            warn!("No job listings found on Jobs.cz using alternative selectors");
            return Ok(());
        }

        let listings = extract_listings(&html, &ctx.page.url(), &JOBS_CZ);
        info!("Found {} potential job listings on Jobs.cz", listings.len());

        for raw in listings {
            if let Some(job) = filter::accept(raw, &ctx.request.metadata, JOBS_CZ.remote_rule) {
                ctx.push_data(&job)?;
                info!("Saved job: {}", job.title);
            }
        }

        Ok(())
    }
}
