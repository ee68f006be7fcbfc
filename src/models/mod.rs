use serde::{Deserialize, Serialize};

/// Job board a listing was scraped from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    LinkedIn,
    Indeed,
    #[serde(rename = "Jobs.cz")]
    JobsCz,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::LinkedIn, Source::Indeed, Source::JobsCz];

    /// Routing label carried by requests for this source
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LINKEDIN_JOBS",
            Self::Indeed => "INDEED_JOBS",
            Self::JobsCz => "JOBS_CZ",
        }
    }

    /// Human readable name, also the `source` field of persisted records
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn",
            Self::Indeed => "Indeed",
            Self::JobsCz => "Jobs.cz",
        }
    }
}

/// Listing fields as read from one card, before filtering
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: Source,
}

/// Persisted job listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: Source,
    pub is_remote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl JobListing {
    pub fn from_raw(raw: RawListing, is_remote: bool) -> Self {
        Self {
            title: raw.title,
            company: raw.company,
            location: raw.location,
            url: raw.url,
            source: raw.source,
            is_remote,
            posted_date: None,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_and_names() {
        let labels: Vec<_> = Source::ALL.iter().map(Source::label).collect();
        assert_eq!(labels, ["LINKEDIN_JOBS", "INDEED_JOBS", "JOBS_CZ"]);
        assert_eq!(Source::JobsCz.name(), "Jobs.cz");
    }

    #[test]
    fn test_record_json_shape() {
        let listing = JobListing::from_raw(
            RawListing {
                title: "Product Manager".to_string(),
                company: "Acme".to_string(),
                location: "Prague".to_string(),
                url: "https://www.jobs.cz/rpd/1".to_string(),
                source: Source::JobsCz,
            },
            false,
        );

        let json = serde_json::to_string(&listing).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Product Manager","company":"Acme","location":"Prague","url":"https://www.jobs.cz/rpd/1","source":"Jobs.cz","isRemote":false}"#
        );
    }
}
