pub mod config;
pub mod crawler;
pub mod error;
pub mod filter;
pub mod merge;
pub mod models;
pub mod scrapers;
pub mod seeds;
pub mod storage;

pub use config::{CrawlConfig, Engine, MergeConfig};
pub use crawler::{job_router, CrawlStats, Crawler, Request, RequestMetadata, Router};
pub use error::ScoutError;
pub use merge::{merge_dataset, MergeReport};
pub use models::{JobListing, RawListing, Source};
pub use seeds::default_seeds;
pub use storage::Dataset;
