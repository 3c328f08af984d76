use crate::types::{Category, DigestError, FeedSource, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Static pipeline configuration: the keyword set and feed list for every
/// category. Loaded once at process start, validated, then read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    keywords: BTreeMap<Category, Vec<String>>,
    feeds: Vec<FeedSource>,
}

impl NewsConfig {
    /// Load a configuration from a JSON file and validate it.
    ///
    /// Expected shape:
    /// `{"keywords": {"tech": ["ии", ...], ...}, "feeds": [{"url": "...", "category": "tech"}, ...]}`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let mut config: NewsConfig = serde_json::from_str(&raw)?;
        config.normalize();
        config.validate()?;
        info!(
            "Loaded configuration from {} ({} feeds)",
            path.as_ref().display(),
            config.feeds.len()
        );
        Ok(config)
    }

    /// Feeds configured for one category, in declaration order.
    pub fn feeds_for(&self, category: Category) -> impl Iterator<Item = &FeedSource> {
        self.feeds.iter().filter(move |f| f.category == category)
    }

    /// Keyword set for one category. Keywords are stored lowercase.
    pub fn keywords_for(&self, category: Category) -> &[String] {
        self.keywords
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn feed_count(&self) -> usize {
        self.feeds.len()
    }

    /// Startup-time validation: every category must have at least one feed
    /// and a non-empty keyword set, and every feed URL must be a usable
    /// http(s) URL. Requests never re-check any of this.
    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            if self.feeds_for(category).next().is_none() {
                return Err(DigestError::Config(format!(
                    "category {} has no configured feeds",
                    category
                )));
            }
            let keywords = self.keywords_for(category);
            if keywords.is_empty() {
                return Err(DigestError::Config(format!(
                    "category {} has an empty keyword set",
                    category
                )));
            }
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(DigestError::Config(format!(
                    "category {} contains a blank keyword",
                    category
                )));
            }
        }
        for feed in &self.feeds {
            let parsed = url::Url::parse(&feed.url)?;
            match parsed.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(DigestError::Config(format!(
                        "unsupported URL scheme {} in {}",
                        scheme, feed.url
                    )));
                }
            }
        }
        Ok(())
    }

    /// Keyword matching is case-insensitive; store the keywords lowercased
    /// so the hot path only lowercases entry text.
    fn normalize(&mut self) {
        for keywords in self.keywords.values_mut() {
            for keyword in keywords.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        let mut config = Self {
            keywords: default_keywords(),
            feeds: default_feeds(),
        };
        config.normalize();
        config
    }
}

fn keyword_set(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_keywords() -> BTreeMap<Category, Vec<String>> {
    let mut keywords = BTreeMap::new();
    keywords.insert(
        Category::PoliticsRu,
        keyword_set(&[
            "правительство",
            "госдума",
            "кремль",
            "путин",
            "закон",
            "выборы",
            "медведев",
        ]),
    );
    keywords.insert(
        Category::International,
        keyword_set(&[
            "сша",
            "китай",
            "украина",
            "нато",
            "оон",
            "санкции",
            "трамп",
            "си цзиньпин",
        ]),
    );
    keywords.insert(
        Category::Economy,
        keyword_set(&[
            "рубль",
            "доллар",
            "цб",
            "инфляция",
            "нефть",
            "газпром",
            "ввп",
            "ставка",
        ]),
    );
    keywords.insert(
        Category::Tech,
        keyword_set(&[
            "ии",
            "нейросеть",
            "смартфон",
            "гаджет",
            "чип",
            "программирование",
            "стартап",
        ]),
    );
    keywords.insert(
        Category::Society,
        keyword_set(&[
            "здравоохранение",
            "образование",
            "дтп",
            "происшествие",
            "погода",
            "мчс",
            "пенсия",
        ]),
    );
    keywords.insert(
        Category::Defense,
        keyword_set(&[
            "армия",
            "вс рф",
            "спецоперация",
            "оружие",
            "танк",
            "гиперзвук",
        ]),
    );
    keywords.insert(
        Category::Regions,
        keyword_set(&[
            "москва",
            "петербург",
            "татарстан",
            "сибирь",
            "дальний восток",
            "крым",
        ]),
    );
    keywords.insert(
        Category::Culture,
        keyword_set(&[
            "музей",
            "театр",
            "кино",
            "наука",
            "космос",
            "роскосмос",
            "фестиваль",
        ]),
    );
    keywords
}

/// Curated feed list covering the major Russian news outlets, grouped by
/// category. Declaration order here is the deterministic traversal order.
fn default_feeds() -> Vec<FeedSource> {
    let groups: [(Category, &[&str]); 8] = [
        (
            Category::PoliticsRu,
            &[
                "https://ria.ru/export/rss2/politics/index.xml",
                "https://tass.ru/rss/v2.xml",
                "https://lenta.ru/rss/news/russia",
                "https://rg.ru/xml/index.xml",
                "https://www.gazeta.ru/export/rss/politics.xml",
                "https://iz.ru/xml/rss/all.xml",
                "https://www.kp.ru/rss/politics.xml",
                "https://www.1tv.ru/news/politics/rss",
                "https://www.rbc.ru/rssfeed/news/politics",
                "https://www.kommersant.ru/rss/politics.xml",
                "https://www.vesti.ru/rss/politics",
                "https://smotrim.ru/rss",
            ],
        ),
        (
            Category::International,
            &[
                "https://ria.ru/export/rss2/world/index.xml",
                "https://lenta.ru/rss/news/world",
                "https://www.bbc.com/russian/rss.xml",
                "https://tass.ru/mezhdunarodnaya-panorama/rss",
                "https://www.dw.com/ru/rss",
                "https://inosmi.ru/export/rss.xml",
                "https://www.rbc.ru/story/rss",
            ],
        ),
        (
            Category::Economy,
            &[
                "https://ria.ru/export/rss2/economy/index.xml",
                "https://www.rbc.ru/rssfeed/news/economics",
                "https://www.vedomosti.ru/rss/news",
                "https://www.kommersant.ru/RSS/news.xml",
                "https://www.forbes.ru/rss",
                "https://www.banki.ru/rss/news/",
                "https://finam.ru/rss/news.xml",
                "https://www.interfax.ru/rss.asp",
            ],
        ),
        (
            Category::Tech,
            &[
                "https://hi-tech.mail.ru/rss/all/",
                "https://habr.com/ru/rss/best/daily/",
                "https://3dnews.ru/rss/",
                "https://www.cnews.ru/rss/news.xml",
                "https://www.ixbt.com/export/news.rss",
                "https://tproger.ru/feed/",
                "https://rozetked.me/rss",
                "https://vc.ru/rss",
                "https://nplus1.ru/rss",
            ],
        ),
        (
            Category::Society,
            &[
                "https://ria.ru/export/rss2/society/index.xml",
                "https://lenta.ru/rss/news/society",
                "https://www.fontanka.ru/fontanka.rss",
                "https://www.mk.ru/rss/social/",
                "https://life.ru/rss",
                "https://www.gazeta.ru/social/rss",
                "https://www.interfax.ru/rss.asp",
            ],
        ),
        (
            Category::Defense,
            &[
                "https://ria.ru/export/rss2/defense_safety/index.xml",
                "https://tass.ru/armiya-i-opk/rss",
                "https://zvezdaweekly.ru/news/rss",
                "https://topwar.ru/rss.xml",
                "https://rg.ru/rss/defense.xml",
            ],
        ),
        (
            Category::Regions,
            &[
                "https://ria.ru/export/rss2/regions/index.xml",
                "https://ura.news/rss",
                "https://tass.ru/regions/rss",
                "https://74.ru/rss/",
                "https://kuban24.tv/rss",
                "https://ngs.ru/rss/",
                "https://e1.ru/rss/",
            ],
        ),
        (
            Category::Culture,
            &[
                "https://ria.ru/export/rss2/culture/index.xml",
                "https://www.culture.ru/rss/news",
                "https://rg.ru/rss/rg/culture.xml",
                "https://nplus1.ru/rss",
                "https://www.afisha.ru/rss/",
                "https://kudago.com/rss",
                "https://tass.ru/kultura/rss",
            ],
        ),
    ];

    groups
        .into_iter()
        .flat_map(|(category, urls)| {
            urls.iter()
                .map(move |url| FeedSource::new(*url, category))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = NewsConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.feed_count() >= 8);
    }

    #[test]
    fn every_category_has_feeds_and_keywords() {
        let config = NewsConfig::default();
        for category in Category::ALL {
            assert!(
                config.feeds_for(category).next().is_some(),
                "no feeds for {}",
                category
            );
            assert!(
                !config.keywords_for(category).is_empty(),
                "no keywords for {}",
                category
            );
        }
    }

    #[test]
    fn validate_rejects_missing_feeds() {
        let mut config = NewsConfig::default();
        config.feeds.retain(|f| f.category != Category::Tech);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("no configured feeds"));
    }

    #[test]
    fn validate_rejects_empty_keyword_set() {
        let mut config = NewsConfig::default();
        config.keywords.insert(Category::Culture, Vec::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("empty keyword set"));
    }

    #[test]
    fn validate_rejects_blank_keyword() {
        let mut config = NewsConfig::default();
        config
            .keywords
            .get_mut(&Category::Tech)
            .unwrap()
            .push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let mut config = NewsConfig::default();
        config
            .feeds
            .push(FeedSource::new("ftp://example.com/feed.xml", Category::Tech));
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_json_config() {
        let raw = r#"{
            "keywords": {"tech": ["ИИ", "чип"]},
            "feeds": [{"url": "https://example.com/rss", "category": "tech"}]
        }"#;
        let mut config: NewsConfig = serde_json::from_str(raw).unwrap();
        config.normalize();
        assert_eq!(config.keywords_for(Category::Tech), &["ии", "чип"]);
        assert_eq!(config.feeds_for(Category::Tech).count(), 1);
        // Only one category configured, so full validation must fail.
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_category_code() {
        let raw = r#"{
            "keywords": {"sports": ["гол"]},
            "feeds": []
        }"#;
        assert!(serde_json::from_str::<NewsConfig>(raw).is_err());
    }
}
