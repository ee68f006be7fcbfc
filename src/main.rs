use clap::{Args, Parser, Subcommand};
use job_scout::scrapers::{ChromeLoader, HttpLoader, PageLoader};
use job_scout::{
    default_seeds, job_router, merge_dataset, CrawlConfig, CrawlStats, Crawler, Dataset, Engine,
    MergeConfig,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "job-scout",
    about = "Scrape product manager listings from LinkedIn, Indeed and Jobs.cz"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl the job boards and store one JSON file per listing
    Crawl(CrawlArgs),
    /// Combine the stored listings into a single JSON array
    Merge(MergeArgs),
}

#[derive(Args)]
struct CrawlArgs {
    #[arg(long, value_enum, default_value = "chrome")]
    engine: Engine,
    /// Show the browser window
    #[arg(long)]
    headful: bool,
    #[arg(long, default_value = "storage")]
    storage_dir: PathBuf,
    /// Save debug screenshots here
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,
    #[arg(long, default_value_t = 20)]
    max_requests: usize,
    /// How many times a failed request is tried again
    #[arg(long, default_value_t = 1)]
    retries: u32,
    /// Keep records from previous runs instead of purging them
    #[arg(long)]
    keep_storage: bool,
}

#[derive(Args)]
struct MergeArgs {
    /// Defaults to storage/datasets/default
    #[arg(long)]
    dataset_dir: Option<PathBuf>,
    /// Defaults to jobs-data.json
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Crawl(args) => crawl(args).await,
        Command::Merge(args) => run_merge(args).await,
    }
}

async fn crawl(args: CrawlArgs) -> anyhow::Result<()> {
    info!("💼 Job Scout - Product Manager Crawler");
    info!("======================================");

    let config = CrawlConfig::default()
        .with_engine(args.engine)
        .with_headless(!args.headful)
        .with_storage_dir(args.storage_dir)
        .with_screenshot_dir(args.screenshot_dir)
        .with_max_requests(args.max_requests)
        .with_retries(args.retries)
        .with_purge_on_start(!args.keep_storage);
    config.validate()?;

    let dataset = Arc::new(Dataset::open(config.dataset_dir(), config.purge_on_start)?);

    let engine = config.engine;
    let stats = match engine {
        Engine::Chrome => {
            let loader = ChromeLoader::launch(&config)?;
            run_crawl(loader, &dataset, config).await?
        }
        Engine::Http => run_crawl(HttpLoader::new(), &dataset, config).await?,
    };

    info!(
        "✅ Found {} product manager positions ({} requests, {} failed)",
        dataset.count()?,
        stats.requests_finished,
        stats.requests_failed
    );
    info!("💾 Data saved to {}", dataset.dir().display());

    Ok(())
}

async fn run_crawl<L: PageLoader>(
    loader: L,
    dataset: &Arc<Dataset>,
    config: CrawlConfig,
) -> anyhow::Result<CrawlStats> {
    let crawler = Crawler::new(loader, job_router(), Arc::clone(dataset), config)?;
    crawler.run(default_seeds()).await
}

async fn run_merge(args: MergeArgs) -> anyhow::Result<()> {
    let defaults = MergeConfig::default();
    let config = MergeConfig {
        dataset_dir: args.dataset_dir.unwrap_or(defaults.dataset_dir),
        output_path: args.output.unwrap_or(defaults.output_path),
    };

    let report = merge_dataset(&config).await?;
    info!(
        "✅ {} of {} records written to {}",
        report.records_merged,
        report.files_found,
        report.output_path.display()
    );
    if !report.skipped.is_empty() {
        info!("Skipped {} unreadable records", report.skipped.len());
    }

    Ok(())
}
