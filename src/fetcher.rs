use crate::types::{DigestError, FeedSource, FetchConfig, NewsEntry, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::parser;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Fallback source name when a feed document carries no title.
const UNKNOWN_SOURCE: &str = "Источник";

/// The seam between the aggregation pipeline and the network. The
/// production implementation is [`FeedFetcher`]; tests substitute canned
/// results.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    /// Retrieve and parse one feed into normalized entries tagged with the
    /// source's category.
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<NewsEntry>>;
}

/// Fetches remote feeds over HTTP and normalizes their entries.
pub struct FeedFetcher {
    client: Client,
    max_entries_per_feed: usize,
}

impl FeedFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            max_entries_per_feed: config.max_entries_per_feed,
        })
    }
}

#[async_trait]
impl FetchFeed for FeedFetcher {
    async fn fetch(&self, source: &FeedSource) -> Result<Vec<NewsEntry>> {
        debug!("Fetching feed: {}", source.url);

        let response = self.client.get(&source.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DigestError::Status(status));
        }

        let bytes = response.bytes().await?;
        let entries = parse_entries(&bytes, source, Utc::now(), self.max_entries_per_feed)?;

        debug!("Feed {} yielded {} entries", source.url, entries.len());
        Ok(entries)
    }
}

/// Parse a raw feed document into normalized entries.
///
/// At most `max_entries` entries are considered. Titles and summaries have
/// markup tags stripped; the publish timestamp falls back from the entry's
/// published time to its updated time to `now`. Entries without a link are
/// skipped, since the link is the entry's identity.
fn parse_entries(
    bytes: &[u8],
    source: &FeedSource,
    now: DateTime<Utc>,
    max_entries: usize,
) -> Result<Vec<NewsEntry>> {
    let feed = parser::parse(bytes).map_err(|e| DigestError::Parse(e.to_string()))?;

    let source_name = feed
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

    let entries = feed
        .entries
        .into_iter()
        .take(max_entries)
        .filter_map(|entry| {
            let link = entry.links.first()?.href.clone();
            let title = strip_markup(&entry.title.map(|t| t.content).unwrap_or_default());
            let summary = strip_markup(&entry.summary.map(|s| s.content).unwrap_or_default());
            let published_at = entry.published.or(entry.updated).unwrap_or(now);

            Some(NewsEntry {
                title,
                summary,
                link,
                published_at,
                source_name: source_name.clone(),
                category: source.category,
            })
        })
        .collect();

    Ok(entries)
}

/// Remove markup tags, including their attribute text. Character content is
/// left untouched apart from trimming the ends: no entity decoding, no
/// whitespace collapsing.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail[1..].find('>') {
            // "<>" carries no tag name; not markup.
            Some(0) => {
                out.push_str("<>");
                rest = &tail[2..];
            }
            Some(close) => {
                rest = &tail[close + 2..];
            }
            None => {
                // Unterminated tag: keep the text as-is.
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}
