//! Cell presentation helpers for the result table.

use chrono::{DateTime, NaiveDate};

/// Formats a stored post date as `Mon D, YYYY` (e.g. `Apr 1, 2025`).
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` prefixes. Anything else
/// is returned unchanged so the cell still shows what the backend sent.
#[must_use]
pub fn format_post_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            trimmed
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        });

    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => trimmed.to_string(),
    }
}

/// Renders `n` with `,` thousands separators.
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
