use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dataset label stamped on every mention served by this dashboard.
pub const PROJECT_LABEL: &str = "PALF";

/// Placeholder for text fields the source row leaves empty.
pub const UNKNOWN: &str = "Unknown";

/// One social-media post mentioning the tracked brand, in the shape the
/// dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub platform: String,
    pub username: String,
    /// ISO-8601 date or timestamp exactly as the backend stores it.
    pub post_date: String,
    pub content: String,
    pub estimated_views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub country: String,
    pub sentiment: Sentiment,
    pub project: String,
    pub url: String,
}

impl Mention {
    /// Calendar-day prefix (`YYYY-MM-DD`) of `post_date`, time of day dropped.
    #[must_use]
    pub fn post_day(&self) -> &str {
        self.post_date.get(..10).unwrap_or(&self.post_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    /// Pill / button color used by the table and the sentiment filter.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Sentiment::Positive => "green",
            Sentiment::Neutral => "yellow",
            Sentiment::Negative => "red",
        }
    }

    /// Parses a raw column value, falling back to `Neutral` for missing or
    /// unrecognized labels.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(Sentiment::Neutral)
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sentiment: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(UnknownSentiment(s.to_string())),
        }
    }
}

/// Fields the fetch-time sort can order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    EstimatedViews,
    PostDate,
    Likes,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::EstimatedViews, SortField::PostDate, SortField::Likes];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::EstimatedViews => "estimated_views",
            SortField::PostDate => "post_date",
            SortField::Likes => "likes",
        }
    }

    /// Button label shown in the sort control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortField::EstimatedViews => "Relevance",
            SortField::PostDate => "Date",
            SortField::Likes => "Likes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "estimated_views" => Ok(SortField::EstimatedViews),
            "post_date" => Ok(SortField::PostDate),
            "likes" => Ok(SortField::Likes),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0}")]
pub struct UnknownSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(UnknownSortDirection(other.to_string())),
        }
    }
}
