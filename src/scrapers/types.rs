use crate::filter::RemoteRule;
use crate::models::Source;

/// Selector fallback chains for one job board.
///
/// Every list is ordered by priority: the first candidate that matches wins.
#[derive(Debug, Clone, Copy)]
pub struct SiteSelectors {
    pub source: Source,
    pub cards: &'static [&'static str],
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    pub link: &'static [&'static str],
    pub default_company: &'static str,
    pub default_location: &'static str,
    pub remote_rule: RemoteRule,
}

pub const NOT_SPECIFIED: &str = "Not specified";
