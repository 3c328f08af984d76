use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topical news category. Each category carries its own keyword set and
/// feed list in [`crate::NewsConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "pol_rf")]
    PoliticsRu,
    #[serde(rename = "int")]
    International,
    #[serde(rename = "econ")]
    Economy,
    #[serde(rename = "tech")]
    Tech,
    #[serde(rename = "society")]
    Society,
    #[serde(rename = "defense")]
    Defense,
    #[serde(rename = "regions")]
    Regions,
    #[serde(rename = "culture")]
    Culture,
}

impl Category {
    /// All categories in declaration order. This is the canonical traversal
    /// order for aggregation and deduplication tie-breaking.
    pub const ALL: [Category; 8] = [
        Category::PoliticsRu,
        Category::International,
        Category::Economy,
        Category::Tech,
        Category::Society,
        Category::Defense,
        Category::Regions,
        Category::Culture,
    ];

    /// Stable short code used in configuration files and the CLI.
    pub fn code(&self) -> &'static str {
        match self {
            Category::PoliticsRu => "pol_rf",
            Category::International => "int",
            Category::Economy => "econ",
            Category::Tech => "tech",
            Category::Society => "society",
            Category::Defense => "defense",
            Category::Regions => "regions",
            Category::Culture => "culture",
        }
    }

    /// Human-readable name shown in rendered digests.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::PoliticsRu => "Политика РФ",
            Category::International => "Международная политика",
            Category::Economy => "Экономика и финансы",
            Category::Tech => "Технологии и IT",
            Category::Society => "Общество",
            Category::Defense => "Оборона и безопасность",
            Category::Regions => "Регионы России",
            Category::Culture => "Культура и наука",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.code() == s)
            .ok_or_else(|| DigestError::UnknownCategory(s.to_string()))
    }
}

/// A configured feed: one remote RSS/Atom URL belonging to exactly one
/// category. Static configuration, immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub category: Category,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, category: Category) -> Self {
        Self {
            url: url.into(),
            category,
        }
    }
}

/// One normalized news item produced by the feed fetcher. `link` is the
/// deduplication identity: two entries with equal links are the same item
/// regardless of originating feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub source_name: String,
    pub category: Category,
}

/// HTTP fetching configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    /// Entries considered per feed, regardless of feed size.
    pub max_entries_per_feed: usize,
    /// Upper bound on feeds fetched in parallel.
    pub max_concurrent_fetches: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "DailyDigestAI/3.0".to_string(),
            timeout_seconds: 15,
            max_redirects: 5,
            max_entries_per_feed: 30,
            max_concurrent_fetches: 8,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("feed parse error: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unknown category code: {0}")]
    UnknownCategory(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DigestError>;
