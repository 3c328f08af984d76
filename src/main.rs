use anyhow::Context;
use clap::{Parser, Subcommand};
use daily_digest::{
    format_digest, Category, DigestAggregator, FeedFetcher, FetchConfig, NewsConfig,
};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "daily-digest", about = "RSS news aggregation and digest assembly")]
struct Cli {
    /// JSON configuration file overriding the built-in feeds and keywords
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a ranked digest for the selected categories
    Digest {
        /// Comma-separated category codes, e.g. pol_rf,tech (default: all)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Lookback window in hours
        #[arg(long, default_value_t = 18)]
        window: u32,

        /// Maximum number of entries in the digest
        #[arg(long, default_value_t = 12)]
        limit: usize,

        /// Number of ranked entries to skip (pagination)
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Count unique matching entries per category
    Stats {
        /// Lookback window in hours
        #[arg(long, default_value_t = 24)]
        window: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => NewsConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => {
            let config = NewsConfig::default();
            config
                .validate()
                .context("built-in configuration is invalid")?;
            config
        }
    };
    let config = Arc::new(config);

    let fetch_config = FetchConfig::default();
    let fetcher = FeedFetcher::new(&fetch_config).context("failed to build HTTP client")?;
    let aggregator = DigestAggregator::new(config, fetcher)
        .with_concurrency(fetch_config.max_concurrent_fetches);

    match cli.command {
        Command::Digest {
            categories,
            window,
            limit,
            offset,
        } => {
            let categories = parse_categories(&categories)?;
            info!(
                "Assembling digest: {} categories, {}h window, offset {}, limit {}",
                categories.len(),
                window,
                offset,
                limit
            );
            let entries = aggregator.digest(&categories, window, offset, limit).await;
            if entries.is_empty() {
                println!("Новостей по выбранным категориям нет");
            } else {
                println!("{}", format_digest(&entries, offset));
            }
        }
        Command::Stats { window } => {
            info!("Computing category statistics over a {}h window", window);
            let counts = aggregator.category_counts(window).await;
            for (category, count) in counts {
                println!("{} — {}", category.display_name(), count);
            }
        }
    }

    Ok(())
}

fn parse_categories(codes: &[String]) -> anyhow::Result<Vec<Category>> {
    if codes.is_empty() {
        return Ok(Category::ALL.to_vec());
    }
    codes
        .iter()
        .map(|code| Category::from_str(code.trim()).map_err(Into::into))
        .collect()
}
