use crate::types::NewsEntry;
use chrono::{DateTime, Utc};
use chrono_tz::Europe::Moscow;

/// Header title of every rendered digest.
pub const DIGEST_TITLE: &str = "DailyDigest AI";

/// Render a ranked entry list with the current time in the header.
pub fn format_digest(entries: &[NewsEntry], offset: usize) -> String {
    format_digest_at(entries, offset, Utc::now())
}

/// Render a ranked entry list into presentation-ready text.
///
/// One block per entry: 1-based index continuing from `offset`, bold title,
/// category display name, publish time of day, source name, and a link
/// reference. The header carries `generated_at` in Moscow time. Pure
/// formatting: entries are neither reordered nor dropped.
pub fn format_digest_at(
    entries: &[NewsEntry],
    offset: usize,
    generated_at: DateTime<Utc>,
) -> String {
    let stamp = generated_at.with_timezone(&Moscow).format("%d.%m.%Y в %H:%M");
    let mut lines = vec![format!("<b>{DIGEST_TITLE}</b>\n{stamp} МСК\n")];

    for (i, entry) in entries.iter().enumerate() {
        let time = entry.published_at.with_timezone(&Moscow).format("%H:%M");
        lines.push(format!(
            "{}. <b>{}</b>\n{} · {} · {}\n<a href='{}'>Читать полностью</a>\n",
            offset + i + 1,
            entry.title,
            entry.category.display_name(),
            time,
            entry.source_name,
            entry.link
        ));
    }

    lines.join("\n")
}
