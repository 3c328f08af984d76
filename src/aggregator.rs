use crate::config::NewsConfig;
use crate::fetcher::FetchFeed;
use crate::filter;
use crate::ranker;
use crate::types::{Category, FeedSource, NewsEntry};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fans fetching and filtering out across all configured feeds and merges
/// the results. Generic over the fetcher so tests can substitute canned
/// feeds for the network.
pub struct DigestAggregator<F: FetchFeed> {
    config: Arc<NewsConfig>,
    fetcher: F,
    max_concurrent_fetches: usize,
}

impl<F: FetchFeed> DigestAggregator<F> {
    pub fn new(config: Arc<NewsConfig>, fetcher: F) -> Self {
        Self {
            config,
            fetcher,
            max_concurrent_fetches: 8,
        }
    }

    pub fn with_concurrency(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    /// Fetch and filter every feed of the requested categories, merging the
    /// per-category results. Categories are traversed in declaration order
    /// regardless of how the caller ordered the request, and feeds in
    /// configuration order, so the merged sequence is deterministic for a
    /// given feed snapshot. No global cap is applied here; only the
    /// per-category cap from the filter.
    pub async fn aggregate(&self, categories: &[Category], window_hours: u32) -> Vec<NewsEntry> {
        let now = Utc::now();
        let requested: Vec<Category> = Category::ALL
            .iter()
            .copied()
            .filter(|c| categories.contains(c))
            .collect();

        let sources = self.sources_for(&requested);
        debug!(
            "Aggregating {} feeds across {} categories",
            sources.len(),
            requested.len()
        );
        let mut per_feed = self.fetch_sources(&sources).await.into_iter();

        let mut merged = Vec::new();
        for category in requested {
            let feed_count = self.config.feeds_for(category).count();
            let mut entries = Vec::new();
            for _ in 0..feed_count {
                entries.extend(per_feed.next().unwrap_or_default());
            }
            let kept = filter::filter_category(
                entries,
                self.config.keywords_for(category),
                window_hours,
                now,
            );
            debug!("Category {}: {} entries after filtering", category, kept.len());
            merged.extend(kept);
        }

        info!(
            "Aggregated {} entries for {} categories over a {}h window",
            merged.len(),
            categories.len(),
            window_hours
        );
        merged
    }

    /// Aggregate, deduplicate, rank by recency, and slice out one digest
    /// page.
    pub async fn digest(
        &self,
        categories: &[Category],
        window_hours: u32,
        offset: usize,
        limit: usize,
    ) -> Vec<NewsEntry> {
        let entries = self.aggregate(categories, window_hours).await;
        ranker::rank(entries, offset, limit)
    }

    /// Count unique matching entries per category over the window.
    ///
    /// Unlike [`DigestAggregator::aggregate`], deduplication is global: a
    /// link counted under one category is never recounted under another, and
    /// the declaration-order traversal decides which category gets it. Only
    /// entries that actually count mark their link as seen.
    pub async fn category_counts(&self, window_hours: u32) -> BTreeMap<Category, usize> {
        let now = Utc::now();
        let cutoff = filter::window_cutoff(now, window_hours);

        let sources = self.sources_for(&Category::ALL);
        let per_feed = self.fetch_sources(&sources).await;

        let mut seen: HashSet<String> = HashSet::new();
        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|c| (*c, 0)).collect();

        for (source, entries) in sources.iter().zip(per_feed) {
            let keywords = self.config.keywords_for(source.category);
            for entry in entries {
                if seen.contains(&entry.link) {
                    continue;
                }
                if filter::is_fresh(&entry, cutoff) && filter::matches_keywords(&entry, keywords) {
                    *counts.entry(source.category).or_insert(0) += 1;
                    seen.insert(entry.link);
                }
            }
        }

        info!(
            "Counted {} unique entries over a {}h window",
            counts.values().sum::<usize>(),
            window_hours
        );
        counts
    }

    fn sources_for(&self, categories: &[Category]) -> Vec<&FeedSource> {
        categories
            .iter()
            .flat_map(|category| self.config.feeds_for(*category))
            .collect()
    }

    /// Fetch the given feeds with bounded parallelism. `buffered` yields
    /// results in input order, so concurrent and sequential execution
    /// produce the same sequence. A failed fetch degrades to an empty
    /// result and never aborts the others.
    async fn fetch_sources(&self, sources: &[&FeedSource]) -> Vec<Vec<NewsEntry>> {
        stream::iter(sources.iter().copied())
            .map(|source| async move {
                match self.fetcher.fetch(source).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!("Skipping feed {}: {}", source.url, e);
                        Vec::new()
                    }
                }
            })
            .buffered(self.max_concurrent_fetches)
            .collect()
            .await
    }
}
