use crate::crawler::request::Request;
use crate::error::ScoutError;
use crate::models::JobListing;
use crate::scrapers::Page;
use crate::storage::Dataset;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Cancellation shared between the driver and the handler it runs.
///
/// A write in progress holds the read side, so once `cancel` returns no
/// record from the cancelled handler can land in the dataset.
#[derive(Debug, Default)]
pub struct CancelToken {
    cancelled: RwLock<bool>,
}

impl CancelToken {
    pub fn cancel(&self) {
        *self
            .cancelled
            .write()
            .unwrap_or_else(PoisonError::into_inner) = true;
    }

    /// Run `f` unless cancelled, keeping cancellation out until it returns
    fn unless_cancelled<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        let cancelled = self.cancelled.read().unwrap_or_else(PoisonError::into_inner);
        if *cancelled {
            return None;
        }
        Some(f())
    }
}

/// What a handler gets to work with for one request
pub struct CrawlContext<'a> {
    pub request: &'a Request,
    pub page: &'a dyn Page,
    dataset: &'a Dataset,
    cancel: &'a CancelToken,
    screenshot_dir: Option<&'a Path>,
    enqueued: Vec<Request>,
    saved: usize,
}

/// Result of handling one request
#[derive(Debug, Default)]
pub struct PageOutcome {
    pub enqueued: Vec<Request>,
    pub saved: usize,
}

impl<'a> CrawlContext<'a> {
    pub fn new(
        request: &'a Request,
        page: &'a dyn Page,
        dataset: &'a Dataset,
        cancel: &'a CancelToken,
        screenshot_dir: Option<&'a Path>,
    ) -> Self {
        Self {
            request,
            page,
            dataset,
            cancel,
            screenshot_dir,
            enqueued: Vec::new(),
            saved: 0,
        }
    }

    /// Persist one accepted listing right away
    pub fn push_data(&mut self, listing: &JobListing) -> Result<()> {
        let dataset = self.dataset;
        match self.cancel.unless_cancelled(|| dataset.push(listing)) {
            Some(pushed) => pushed?,
            None => return Err(ScoutError::Cancelled(self.request.url.clone()).into()),
        };
        self.saved += 1;
        Ok(())
    }

    /// Queue a follow-up request after the current one
    pub fn enqueue(&mut self, request: Request) {
        self.enqueued.push(request);
    }

    /// Path for a screenshot named `name`, if screenshots are enabled
    pub fn screenshot_path(&self, name: &str) -> Option<PathBuf> {
        self.screenshot_dir.map(|dir| dir.join(name))
    }

    pub fn into_outcome(self) -> PageOutcome {
        PageOutcome {
            enqueued: self.enqueued,
            saved: self.saved,
        }
    }
}
