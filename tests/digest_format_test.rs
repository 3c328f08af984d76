use chrono::{TimeZone, Utc};
use daily_digest::digest::DIGEST_TITLE;
use daily_digest::{format_digest_at, Category, NewsEntry};

fn entry(link: &str, title: &str, hour: u32, category: Category) -> NewsEntry {
    NewsEntry {
        title: title.to_string(),
        summary: "описание".to_string(),
        link: link.to_string(),
        published_at: Utc.with_ymd_and_hms(2025, 7, 1, hour, 30, 0).unwrap(),
        source_name: "РИА Новости".to_string(),
        category,
    }
}

fn generated_at() -> chrono::DateTime<Utc> {
    // 12:00 UTC = 15:00 in Moscow.
    Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()
}

#[test]
fn header_carries_moscow_generation_time() {
    let text = format_digest_at(&[], 0, generated_at());
    assert!(text.contains(DIGEST_TITLE));
    assert!(text.contains("01.07.2025 в 15:00 МСК"));
}

#[test]
fn renders_one_block_per_entry_in_order() {
    let entries = vec![
        entry("https://n/1", "Первая новость", 9, Category::PoliticsRu),
        entry("https://n/2", "Вторая новость", 8, Category::Economy),
    ];
    let text = format_digest_at(&entries, 0, generated_at());

    assert!(text.contains("1. <b>Первая новость</b>"));
    assert!(text.contains("2. <b>Вторая новость</b>"));
    assert!(text.find("Первая новость").unwrap() < text.find("Вторая новость").unwrap());
    assert!(text.contains("Политика РФ"));
    assert!(text.contains("Экономика и финансы"));
    assert!(text.contains("РИА Новости"));
    assert!(text.contains("<a href='https://n/1'>Читать полностью</a>"));
}

#[test]
fn entry_time_is_rendered_in_moscow_time() {
    // 09:30 UTC = 12:30 in Moscow.
    let entries = vec![entry("https://n/1", "Новость", 9, Category::Tech)];
    let text = format_digest_at(&entries, 0, generated_at());
    assert!(text.contains("12:30"));
}

#[test]
fn numbering_continues_from_offset() {
    let entries = vec![
        entry("https://n/13", "Тринадцатая", 9, Category::Tech),
        entry("https://n/14", "Четырнадцатая", 8, Category::Tech),
    ];
    let text = format_digest_at(&entries, 12, generated_at());
    assert!(text.contains("13. <b>Тринадцатая</b>"));
    assert!(text.contains("14. <b>Четырнадцатая</b>"));
}

#[test]
fn formatter_never_drops_entries() {
    let entries: Vec<NewsEntry> = (0..12)
        .map(|i| entry(&format!("https://n/{i}"), &format!("Новость {i}"), 9, Category::Tech))
        .collect();
    let text = format_digest_at(&entries, 0, generated_at());
    for i in 0..12 {
        assert!(text.contains(&format!("Новость {i}")));
    }
}
