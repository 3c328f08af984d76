use crate::types::NewsEntry;
use chrono::{DateTime, Duration, Utc};

/// Cap on a single category's filtered result, applied after sorting.
pub const MAX_ENTRIES_PER_CATEGORY: usize = 40;

/// Oldest admissible publish time for the given lookback window.
pub fn window_cutoff(now: DateTime<Utc>, window_hours: u32) -> DateTime<Utc> {
    now - Duration::hours(window_hours as i64)
}

/// Entries published exactly at the cutoff are still inside the window.
pub fn is_fresh(entry: &NewsEntry, cutoff: DateTime<Utc>) -> bool {
    entry.published_at >= cutoff
}

/// Case-insensitive raw substring match of any keyword against the
/// concatenated title and summary. A keyword inside a longer word counts;
/// keywords are stored lowercase by [`crate::NewsConfig`].
pub fn matches_keywords(entry: &NewsEntry, keywords: &[String]) -> bool {
    let text = format!("{} {}", entry.title, entry.summary).to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

/// Keep a category's entries that are inside the time window and match at
/// least one keyword, newest first, capped at [`MAX_ENTRIES_PER_CATEGORY`].
pub fn filter_category(
    entries: Vec<NewsEntry>,
    keywords: &[String],
    window_hours: u32,
    now: DateTime<Utc>,
) -> Vec<NewsEntry> {
    let cutoff = window_cutoff(now, window_hours);
    let mut kept: Vec<NewsEntry> = entries
        .into_iter()
        .filter(|entry| is_fresh(entry, cutoff) && matches_keywords(entry, keywords))
        .collect();
    kept.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    kept.truncate(MAX_ENTRIES_PER_CATEGORY);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
    }

    fn entry(title: &str, summary: &str, link: &str, age_hours: i64) -> NewsEntry {
        NewsEntry {
            title: title.to_string(),
            summary: summary.to_string(),
            link: link.to_string(),
            published_at: now() - Duration::hours(age_hours),
            source_name: "Лента".to_string(),
            category: Category::Tech,
        }
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keeps_only_entries_inside_window() {
        let entries = vec![
            entry("нейросеть растёт", "", "https://a/1", 2),
            entry("нейросеть вчера", "", "https://a/2", 30),
        ];
        let kept = filter_category(entries, &keywords(&["нейросеть"]), 18, now());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].link, "https://a/1");
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let at_cutoff = entry("чип на границе", "", "https://a/edge", 18);
        let kept = filter_category(vec![at_cutoff], &keywords(&["чип"]), 18, now());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn keyword_matches_inside_longer_word() {
        // "ии" matching inside "линии" still counts: raw substring semantics.
        let entries = vec![entry("Новые линии метро", "", "https://a/sub", 1)];
        let kept = filter_category(entries, &keywords(&["ии"]), 18, now());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn keyword_match_is_case_insensitive_over_title_and_summary() {
        let entries = vec![
            entry("СТАРТАП недели", "", "https://a/title", 1),
            entry("Обзор", "новый Гаджет в продаже", "https://a/summary", 1),
            entry("Прочее", "ничего интересного", "https://a/none", 1),
        ];
        let kept = filter_category(entries, &keywords(&["стартап", "гаджет"]), 18, now());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn sorts_newest_first_and_caps_result() {
        let entries: Vec<NewsEntry> = (0..60)
            .map(|i| entry("чип", "", &format!("https://a/{i}"), i))
            .collect();
        let kept = filter_category(entries, &keywords(&["чип"]), 100, now());
        assert_eq!(kept.len(), MAX_ENTRIES_PER_CATEGORY);
        assert!(kept.windows(2).all(|w| w[0].published_at >= w[1].published_at));
        // Newest entry survives the cap.
        assert_eq!(kept[0].link, "https://a/0");
    }
}
