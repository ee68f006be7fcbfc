use crate::crawler::context::CrawlContext;
use crate::scrapers::{IndeedHandler, JobsCzHandler, LinkedInHandler};
use anyhow::Result;
use std::collections::HashMap;
use tracing::{info, warn};

/// Processes one loaded page
pub trait RequestHandler: Send + Sync {
    fn handle(&self, ctx: &mut CrawlContext<'_>) -> Result<()>;
}

/// Handler for requests whose label has no route
pub struct DefaultHandler;

impl RequestHandler for DefaultHandler {
    fn handle(&self, ctx: &mut CrawlContext<'_>) -> Result<()> {
        info!("Processing {}", ctx.request.url);
        warn!("No route found for {} - skipping", ctx.request.url);
        Ok(())
    }
}

/// Static label to handler table
pub struct Router {
    handlers: HashMap<String, Box<dyn RequestHandler>>,
    default_handler: Box<dyn RequestHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            default_handler: Box::new(DefaultHandler),
        }
    }

    pub fn add_handler(mut self, label: &str, handler: impl RequestHandler + 'static) -> Self {
        self.handlers.insert(label.to_string(), Box::new(handler));
        self
    }

    pub fn route(&self, label: Option<&str>) -> &dyn RequestHandler {
        match label.and_then(|label| self.handlers.get(label)) {
            Some(handler) => handler.as_ref(),
            None => self.default_handler.as_ref(),
        }
    }

    pub fn has_route(&self, label: &str) -> bool {
        self.handlers.contains_key(label)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Router with a handler for every supported job board
pub fn job_router() -> Router {
    Router::new()
        .add_handler(LinkedInHandler::LABEL, LinkedInHandler)
        .add_handler(IndeedHandler::LABEL, IndeedHandler)
        .add_handler(JobsCzHandler::LABEL, JobsCzHandler)
}
