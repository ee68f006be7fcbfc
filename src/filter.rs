use crate::crawler::RequestMetadata;
use crate::models::{JobListing, RawListing};

/// Keyword a title must contain to be kept
pub const TITLE_KEYWORD: &str = "product";
const REMOTE_KEYWORD: &str = "remote";
/// Target location of the searches aimed at remote positions
pub const REMOTE_TARGET: &str = "Remote";

/// Which signals mark a listing as remote.
///
/// The location is always consulted; boards differ in whether the title and
/// the search target count too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteRule {
    pub check_title: bool,
    pub check_target: bool,
}

impl RemoteRule {
    pub const LOCATION_ONLY: Self = Self {
        check_title: false,
        check_target: false,
    };

    pub fn is_remote(&self, raw: &RawListing, metadata: &RequestMetadata) -> bool {
        raw.location.to_lowercase().contains(REMOTE_KEYWORD)
            || (self.check_title && raw.title.to_lowercase().contains(REMOTE_KEYWORD))
            || (self.check_target && metadata.target_location == REMOTE_TARGET)
    }
}

/// Keep product roles and stamp the remote flag; everything else is dropped
pub fn accept(raw: RawListing, metadata: &RequestMetadata, rule: RemoteRule) -> Option<JobListing> {
    if raw.title.is_empty() || !raw.title.to_lowercase().contains(TITLE_KEYWORD) {
        return None;
    }

    let is_remote = rule.is_remote(&raw, metadata);
    Some(JobListing::from_raw(raw, is_remote))
}
