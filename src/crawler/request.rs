use url::Url;

/// Data carried from a seed to every request derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    /// Location the search was aimed at, e.g. "Prague" or "Remote"
    pub target_location: String,
}

impl RequestMetadata {
    pub fn new(target_location: impl Into<String>) -> Self {
        Self {
            target_location: target_location.into(),
        }
    }
}

/// One page to visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    /// Queue de-duplication key: the URL without its fragment
    pub unique_key: String,
    /// Routing label; `None` goes to the default handler
    pub label: Option<String>,
    pub metadata: RequestMetadata,
    pub retry_count: u32,
}

impl Request {
    pub fn new(url: impl Into<String>, label: Option<&str>, metadata: RequestMetadata) -> Self {
        let url = url.into();
        Self {
            unique_key: unique_key_for(&url),
            url,
            label: label.map(str::to_string),
            metadata,
            retry_count: 0,
        }
    }

    pub fn labeled(url: impl Into<String>, label: &str, target_location: &str) -> Self {
        Self::new(url, Some(label), RequestMetadata::new(target_location))
    }

    /// Label for logs and file names
    pub fn label_or_default(&self) -> &str {
        self.label.as_deref().unwrap_or("DEFAULT")
    }
}

fn unique_key_for(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.into()
        }
        Err(_) => url.trim().to_string(),
    }
}
