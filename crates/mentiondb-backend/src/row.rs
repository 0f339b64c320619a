//! Raw backend rows and their conversion into [`Mention`] records.
//!
//! Column names of the hosted table appear only here and in the query
//! builder's sort mapping, so a schema change touches one place.

use std::collections::BTreeSet;

use mentiondb_core::{Mention, Sentiment, PROJECT_LABEL, UNKNOWN};
use serde_json::Value;

/// One row as returned by the backend: column name to JSON value.
pub type RawRow = serde_json::Map<String, Value>;

/// Column names of the `DATA_PALF_PR` export.
pub mod columns {
    pub const ID: &str = "id";
    pub const PLATFORM: &str = "Platform";
    pub const INFLUENCER: &str = "Influencer";
    pub const SOURCE: &str = "Source";
    pub const DATE: &str = "Date";
    pub const HEADLINE: &str = "Headline";
    pub const HIT_SENTENCE: &str = "Hit Sentence";
    pub const ESTIMATED_VIEWS: &str = "Estimated Views";
    pub const ENGAGEMENT: &str = "Engagement";
    pub const TWITTER_SOCIAL_ECHO: &str = "Twitter Social Echo";
    pub const FACEBOOK_SOCIAL_ECHO: &str = "Facebook Social Echo";
    pub const REDDIT_SOCIAL_ECHO: &str = "Reddit Social Echo";
    pub const COUNTRY: &str = "Country";
    pub const SENTIMENT: &str = "Sentiment";
    pub const URL: &str = "URL";
}

/// Converts a raw backend row into a [`Mention`], one method per field.
///
/// Implementations must never fail: missing or malformed values take the
/// documented defaults.
pub trait RowAdapter {
    fn id(&self, row: &RawRow) -> String;
    fn platform(&self, row: &RawRow) -> String;
    fn username(&self, row: &RawRow) -> String;
    fn post_date(&self, row: &RawRow) -> String;
    fn content(&self, row: &RawRow) -> String;
    fn estimated_views(&self, row: &RawRow) -> u64;
    fn likes(&self, row: &RawRow) -> u64;
    fn shares(&self, row: &RawRow) -> u64;
    fn country(&self, row: &RawRow) -> String;
    fn sentiment(&self, row: &RawRow) -> Sentiment;
    fn url(&self, row: &RawRow) -> String;

    fn comments(&self, _row: &RawRow) -> u64 {
        0
    }

    fn project(&self, _row: &RawRow) -> String {
        PROJECT_LABEL.to_string()
    }

    fn to_mention(&self, row: &RawRow) -> Mention {
        Mention {
            id: self.id(row),
            platform: self.platform(row),
            username: self.username(row),
            post_date: self.post_date(row),
            content: self.content(row),
            estimated_views: self.estimated_views(row),
            likes: self.likes(row),
            shares: self.shares(row),
            comments: self.comments(row),
            country: self.country(row),
            sentiment: self.sentiment(row),
            project: self.project(row),
            url: self.url(row),
        }
    }
}

/// Adapter for the media-monitoring export layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PalfRowAdapter;

impl RowAdapter for PalfRowAdapter {
    fn id(&self, row: &RawRow) -> String {
        text(row, columns::ID)
            .or_else(|| text(row, columns::URL))
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }

    fn platform(&self, row: &RawRow) -> String {
        text(row, columns::PLATFORM).unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn username(&self, row: &RawRow) -> String {
        text(row, columns::INFLUENCER)
            .or_else(|| text(row, columns::SOURCE))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn post_date(&self, row: &RawRow) -> String {
        text(row, columns::DATE).unwrap_or_default()
    }

    fn content(&self, row: &RawRow) -> String {
        text(row, columns::HEADLINE)
            .or_else(|| text(row, columns::HIT_SENTENCE))
            .unwrap_or_default()
    }

    fn estimated_views(&self, row: &RawRow) -> u64 {
        count(row, columns::ESTIMATED_VIEWS)
    }

    fn likes(&self, row: &RawRow) -> u64 {
        count(row, columns::ENGAGEMENT)
    }

    fn shares(&self, row: &RawRow) -> u64 {
        [
            columns::TWITTER_SOCIAL_ECHO,
            columns::FACEBOOK_SOCIAL_ECHO,
            columns::REDDIT_SOCIAL_ECHO,
        ]
        .into_iter()
        .map(|col| count(row, col))
        .fold(0, u64::saturating_add)
    }

    fn country(&self, row: &RawRow) -> String {
        text(row, columns::COUNTRY).unwrap_or_else(|| UNKNOWN.to_string())
    }

    fn sentiment(&self, row: &RawRow) -> Sentiment {
        Sentiment::from_raw(text(row, columns::SENTIMENT).as_deref())
    }

    fn url(&self, row: &RawRow) -> String {
        text(row, columns::URL).unwrap_or_default()
    }
}

/// Trimmed, non-empty textual value of `column`. Numbers and booleans are
/// rendered as text; null, arrays and objects count as absent.
fn text(row: &RawRow, column: &str) -> Option<String> {
    let raw = match row.get(column)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!raw.is_empty()).then_some(raw)
}

fn count(row: &RawRow, column: &str) -> u64 {
    text(row, column).map_or(0, |raw| parse_count(&raw))
}

/// Parses a textual metric into a non-negative integer.
///
/// Drops `,` thousands separators and keeps the leading digits, so `"1,234"`
/// is 1234 and `"12.7"` is 12. Empty, negative or non-numeric input is 0.
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    digits
        .chars()
        .take_while(char::is_ascii_digit)
        .try_fold(0u64, |acc, c| {
            let d = u64::from(c.to_digit(10)?);
            Some(acc.saturating_mul(10).saturating_add(d))
        })
        .unwrap_or(0)
}

/// Sorted, deduplicated, non-empty country values from `select=Country` rows.
#[must_use]
pub fn distinct_countries(rows: &[RawRow]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| text(row, columns::COUNTRY))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
