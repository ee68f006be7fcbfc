use crate::crawler::{CrawlContext, RequestHandler};
use crate::filter::{self, RemoteRule};
use crate::models::Source;
use crate::scrapers::extract::extract_listings;
use crate::scrapers::types::{SiteSelectors, NOT_SPECIFIED};
use anyhow::Result;
use std::time::Duration;
use tracing::{error, info, warn};

/// Client-side rendering settles well after network idle on LinkedIn
const RENDER_DELAY: Duration = Duration::from_secs(3);

pub const LINKEDIN: SiteSelectors = SiteSelectors {
    source: Source::LinkedIn,
    cards: &[".job-search-card", ".jobs-search-results__list-item"],
    title: &[".job-search-card__title", ".job-card-list__title", "h3"],
    company: &[
        ".job-search-card__subtitle",
        ".job-card-container__company-name",
        "h4",
    ],
    location: &[
        ".job-search-card__location",
        ".job-card-container__metadata-item",
        ".job-card-container__metadata-wrapper span",
    ],
    link: &["a"],
    default_company: NOT_SPECIFIED,
    default_location: "",
    remote_rule: RemoteRule {
        check_title: false,
        check_target: true,
    },
};

/// LinkedIn public job search pages
pub struct LinkedInHandler;

impl LinkedInHandler {
    pub const LABEL: &'static str = Source::LinkedIn.label();
}

fn requires_login(title: &str) -> bool {
    title.contains("Sign In") || title.contains("Login")
}

impl RequestHandler for LinkedInHandler {
    fn handle(&self, ctx: &mut CrawlContext<'_>) -> Result<()> {
        let target = ctx.request.metadata.target_location.clone();
        info!("Scraping LinkedIn jobs for {}", target);

        ctx.page.wait_for_network_idle()?;
        ctx.page.pause(RENDER_DELAY);

        if let Some(path) = ctx.screenshot_path(&format!("linkedin-{}.png", target)) {
            if let Err(e) = ctx.page.screenshot(&path) {
                warn!("Could not capture LinkedIn screenshot: {:#}", e);
            }
        }

        let html = ctx.page.content()?;
        let listings = extract_listings(&html, &ctx.page.url(), &LINKEDIN);

        if listings.is_empty() {
            warn!("No job listings found on LinkedIn for {}", target);

            let page_title = ctx.page.title()?;
            info!("Page title: {}", page_title);

            if requires_login(&page_title) {
                error!("LinkedIn is requiring login - we cannot proceed");
            }
            return Ok(());
        }

        info!(
            "Found {} potential job listings on LinkedIn for {}",
            listings.len(),
            target
        );

        for raw in listings {
            if let Some(job) = filter::accept(raw, &ctx.request.metadata, LINKEDIN.remote_rule) {
                ctx.push_data(&job)?;
                info!("Saved job: {}", job.title);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::Request;
    use crate::scrapers::StaticPage;
    use crate::storage::Dataset;
    use crate::crawler::CancelToken;
    use tempfile::tempdir;

    const SEARCH_URL: &str =
        "https://www.linkedin.com/jobs/search/?keywords=product%20manager&location=Prague";

    fn run(html: &str, target: &str) -> (usize, Vec<crate::models::JobListing>) {
        let dir = tempdir().unwrap();
        let dataset = Dataset::open(dir.path(), true).unwrap();
        let cancel = CancelToken::default();
        let page = StaticPage::new(SEARCH_URL, html);
        let request = Request::labeled(SEARCH_URL, LinkedInHandler::LABEL, target);

        let mut ctx = CrawlContext::new(&request, &page, &dataset, &cancel, None);
        LinkedInHandler.handle(&mut ctx).unwrap();
        let saved = ctx.into_outcome().saved;

        let mut paths: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        paths.sort();
        let jobs = paths
            .iter()
            .map(|path| serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap())
            .collect();
        (saved, jobs)
    }

    #[test]
    fn test_keeps_only_product_roles() {
        let html = r#"
            <ul class="jobs-search__results-list">
                <li>
                    <div class="job-search-card">
                        <a class="base-card__full-link" href="/jobs/view/senior-product-manager-1"></a>
                        <h3 class="job-search-card__title">  Senior Product Manager  </h3>
                        <h4 class="job-search-card__subtitle">Acme s.r.o.</h4>
                        <span class="job-search-card__location">Prague</span>
                    </div>
                </li>
                <li>
                    <div class="job-search-card">
                        <a class="base-card__full-link" href="/jobs/view/software-engineer-2"></a>
                        <h3 class="job-search-card__title">Software Engineer</h3>
                        <span class="job-search-card__location">Remote</span>
                    </div>
                </li>
            </ul>
        "#;

        let (saved, jobs) = run(html, "Prague");

        assert_eq!(saved, 1);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Senior Product Manager");
        assert_eq!(jobs[0].company, "Acme s.r.o.");
        assert_eq!(jobs[0].location, "Prague");
        assert_eq!(jobs[0].url, "https://www.linkedin.com/jobs/view/senior-product-manager-1");
        assert_eq!(jobs[0].source, Source::LinkedIn);
        assert!(!jobs[0].is_remote);
    }

    #[test]
    fn test_remote_search_marks_everything_remote() {
        let html = r#"
            <li class="jobs-search-results__list-item">
                <a href="/jobs/view/3"><span class="job-card-list__title">Product Owner</span></a>
                <div class="job-card-container__metadata-wrapper"><span>Brno</span></div>
            </li>
        "#;

        let (_, jobs) = run(html, "Remote");

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, NOT_SPECIFIED);
        assert_eq!(jobs[0].location, "Brno");
        assert!(jobs[0].is_remote);
    }

    #[test]
    fn test_login_wall_yields_nothing() {
        let html = r#"
            <html><head><title>LinkedIn Login, Sign in | LinkedIn</title></head>
            <body><form class="login__form"></form></body></html>
        "#;

        let (saved, jobs) = run(html, "Prague");

        assert_eq!(saved, 0);
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_login_title_detection() {
        assert!(requires_login("Sign In | LinkedIn"));
        assert!(requires_login("LinkedIn Login"));
        assert!(!requires_login("Product Manager jobs in Prague"));
    }
}
