use crate::crawler::Request;
use crate::filter::REMOTE_TARGET;
use crate::scrapers::{IndeedHandler, JobsCzHandler, LinkedInHandler};

/// Searches the crawl starts from: product manager roles in Prague and remote
pub fn default_seeds() -> Vec<Request> {
    vec![
        Request::labeled(
            "https://www.linkedin.com/jobs/search/?keywords=product%20manager&location=Prague",
            LinkedInHandler::LABEL,
            "Prague",
        ),
        Request::labeled(
            "https://www.linkedin.com/jobs/search/?keywords=product%20manager&location=Remote",
            LinkedInHandler::LABEL,
            REMOTE_TARGET,
        ),
        Request::labeled(
            "https://cz.indeed.com/jobs?q=product+manager&l=Prague",
            IndeedHandler::LABEL,
            "Prague",
        ),
        Request::labeled(
            "https://cz.indeed.com/jobs?q=product+manager&l=remote",
            IndeedHandler::LABEL,
            REMOTE_TARGET,
        ),
        // Jobs.cz last, it is the least reliable of the three
        Request::labeled(
            "https://www.jobs.cz/prace/product-manager/?locality%5B%5D=prague",
            JobsCzHandler::LABEL,
            "Prague",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::job_router;

    #[test]
    fn test_seeds_are_routable_and_unique() {
        let seeds = default_seeds();
        let router = job_router();

        assert_eq!(seeds.len(), 5);
        for seed in &seeds {
            assert!(router.has_route(seed.label.as_deref().unwrap()));
        }

        let mut keys: Vec<_> = seeds.iter().map(|seed| seed.unique_key.as_str()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 5);

        let remote = seeds
            .iter()
            .filter(|seed| seed.metadata.target_location == REMOTE_TARGET)
            .count();
        assert_eq!(remote, 2);
    }
}
