pub mod types;
pub mod config;
pub mod fetcher;
pub mod filter;
pub mod aggregator;
pub mod ranker;
pub mod digest;

pub use types::*;
pub use config::NewsConfig;
pub use fetcher::{FeedFetcher, FetchFeed};
pub use aggregator::DigestAggregator;
pub use ranker::{dedupe_by_link, rank};
pub use digest::{format_digest, format_digest_at};
