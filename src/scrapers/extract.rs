use crate::models::RawListing;
use crate::scrapers::types::SiteSelectors;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Ordered list of CSS selectors tried one after another
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    pub fn new(candidates: &[&str]) -> Self {
        let selectors = candidates
            .iter()
            .filter_map(|candidate| match Selector::parse(candidate) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    warn!("Skipping invalid selector {}: {}", candidate, e);
                    None
                }
            })
            .collect();
        Self { selectors }
    }

    /// Elements of the first selector that matches anything in the document
    pub fn select_first_matching<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        self.selectors
            .iter()
            .map(|selector| document.select(selector).collect::<Vec<_>>())
            .find(|elements| !elements.is_empty())
            .unwrap_or_default()
    }

    /// Trimmed text of the first match with non-empty text inside `scope`
    pub fn text_in(&self, scope: ElementRef<'_>) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            scope
                .select(selector)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .find(|text| !text.is_empty())
        })
    }

    /// First non-empty value of `attr` on an element matching the chain inside `scope`
    pub fn attr_in(&self, scope: ElementRef<'_>, attr: &str) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            scope
                .select(selector)
                .filter_map(|el| el.value().attr(attr))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        })
    }

    /// Same as [`attr_in`](Self::attr_in) but over the whole document
    pub fn attr_in_document(&self, document: &Html, attr: &str) -> Option<String> {
        self.attr_in(document.root_element(), attr)
    }
}

/// Resolve a possibly relative `href` against the page it was found on
pub fn resolve_link(href: &str, page_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with("javascript:") {
        return None;
    }

    match Url::parse(page_url) {
        Ok(base) => base.join(href).ok().map(String::from),
        Err(_) => Url::parse(href).ok().map(String::from),
    }
}

/// Read every card on the page into raw listings.
///
/// A card is kept when it has a title or a link that resolves.
pub fn extract_listings(html: &str, page_url: &str, site: &SiteSelectors) -> Vec<RawListing> {
    let document = Html::parse_document(html);

    let cards = SelectorChain::new(site.cards).select_first_matching(&document);
    let title = SelectorChain::new(site.title);
    let company = SelectorChain::new(site.company);
    let location = SelectorChain::new(site.location);
    let link = SelectorChain::new(site.link);

    debug!("Found {} {} cards", cards.len(), site.source.name());

    cards
        .into_iter()
        .filter_map(|card| {
            let title = title.text_in(card).unwrap_or_default();
            let url = link
                .attr_in(card, "href")
                .and_then(|href| resolve_link(&href, page_url))
                .unwrap_or_default();

            if title.is_empty() && url.is_empty() {
                return None;
            }

            Some(RawListing {
                title,
                company: company
                    .text_in(card)
                    .unwrap_or_else(|| site.default_company.to_string()),
                location: location
                    .text_in(card)
                    .unwrap_or_else(|| site.default_location.to_string()),
                url,
                source: site.source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RemoteRule;
    use crate::models::Source;
    use crate::scrapers::types::NOT_SPECIFIED;

    const TEST_SITE: SiteSelectors = SiteSelectors {
        source: Source::LinkedIn,
        cards: &[".card", ".fallback-card"],
        title: &[".title", "h3"],
        company: &[".company"],
        location: &[".location"],
        link: &["a"],
        default_company: NOT_SPECIFIED,
        default_location: "",
        remote_rule: RemoteRule::LOCATION_ONLY,
    };

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("/jobs/view/1", "https://www.linkedin.com/jobs/search/?keywords=pm"),
            Some("https://www.linkedin.com/jobs/view/1".to_string())
        );
        assert_eq!(
            resolve_link("https://other.com/job", "https://www.linkedin.com/jobs"),
            Some("https://other.com/job".to_string())
        );
        assert_eq!(resolve_link("", "https://www.linkedin.com"), None);
        assert_eq!(resolve_link("/relative", "not a url"), None);
    }

    #[test]
    fn test_first_matching_card_selector_wins() {
        let html = r#"
            <div class="fallback-card"><h3>Fallback</h3></div>
            <div class="card"><h3>Primary</h3></div>
        "#;
        let listings = extract_listings(html, "https://example.com", &TEST_SITE);

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Primary");
    }

    #[test]
    fn test_falls_back_when_primary_selector_is_missing() {
        let html = r#"<div class="fallback-card"><h3>Fallback</h3></div>"#;
        let listings = extract_listings(html, "https://example.com", &TEST_SITE);

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Fallback");
    }

    #[test]
    fn test_field_chain_skips_empty_text() {
        let html = r#"
            <div class="card">
                <span class="title">   </span>
                <h3>  Product Owner </h3>
                <a href="/job/7">link</a>
            </div>
        "#;
        let listings = extract_listings(html, "https://example.com/search", &TEST_SITE);

        assert_eq!(listings[0].title, "Product Owner");
        assert_eq!(listings[0].url, "https://example.com/job/7");
    }

    #[test]
    fn test_defaults_and_dropped_cards() {
        let html = r#"
            <div class="card"><h3>Product Manager</h3></div>
            <div class="card"><span class="company">Ghost Inc</span></div>
            <div class="card"><a href="/job/2">Untitled</a></div>
        "#;
        let listings = extract_listings(html, "https://example.com", &TEST_SITE);

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].company, NOT_SPECIFIED);
        assert_eq!(listings[0].location, "");
        assert_eq!(listings[0].url, "");
        assert_eq!(listings[1].title, "");
        assert_eq!(listings[1].url, "https://example.com/job/2");
    }

    #[test]
    fn test_invalid_selectors_are_skipped() {
        let chain = SelectorChain::new(&["[[broken", "h3"]);
        let document = Html::parse_document("<h3>Still works</h3>");
        assert_eq!(chain.select_first_matching(&document).len(), 1);
    }
}
