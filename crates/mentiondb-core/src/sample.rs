//! Built-in records shown when no backend is configured.

use crate::mention::{Mention, Sentiment, PROJECT_LABEL};

struct SampleRow {
    id: &'static str,
    platform: &'static str,
    username: &'static str,
    post_date: &'static str,
    content: &'static str,
    estimated_views: u64,
    likes: u64,
    shares: u64,
    comments: u64,
    country: &'static str,
    sentiment: Sentiment,
    url: &'static str,
}

const SAMPLE_ROWS: [SampleRow; 5] = [
    SampleRow {
        id: "1",
        platform: "Twitter",
        username: "@user123",
        post_date: "2025-04-01T12:00:00Z",
        content: "Just saw the new HYBE Latin America project! Amazing visuals and sound! #HYBE #LatinAmerica",
        estimated_views: 15_000,
        likes: 450,
        shares: 120,
        comments: 45,
        country: "Mexico",
        sentiment: Sentiment::Positive,
        url: "https://twitter.com/user123",
    },
    SampleRow {
        id: "2",
        platform: "Instagram",
        username: "music_lover_2022",
        post_date: "2025-03-28T08:30:00Z",
        content: "Not sure about this new direction HYBE is taking with their Latin America project. Mixed feelings.",
        estimated_views: 8_700,
        likes: 230,
        shares: 45,
        comments: 38,
        country: "Colombia",
        sentiment: Sentiment::Neutral,
        url: "https://instagram.com/music_lover_2022",
    },
    SampleRow {
        id: "3",
        platform: "TikTok",
        username: "dancefan",
        post_date: "2025-03-29T15:45:00Z",
        content: "The choreography in the new HYBE Latin project is incredible! #dance #hybe",
        estimated_views: 45_000,
        likes: 3_200,
        shares: 1_800,
        comments: 240,
        country: "Brazil",
        sentiment: Sentiment::Positive,
        url: "https://tiktok.com/dancefan",
    },
    SampleRow {
        id: "4",
        platform: "YouTube",
        username: "MusicCritic",
        post_date: "2025-03-26T10:15:00Z",
        content: "I believe this HYBE Latin America project is missing the mark. Here's why...",
        estimated_views: 12_300,
        likes: 340,
        shares: 56,
        comments: 89,
        country: "Argentina",
        sentiment: Sentiment::Negative,
        url: "https://youtube.com/musiccritic",
    },
    SampleRow {
        id: "5",
        platform: "Facebook",
        username: "Latin Music Today",
        post_date: "2025-03-30T14:20:00Z",
        content: "HYBE's new Latin America project is breaking streaming records already! What do you think?",
        estimated_views: 23_000,
        likes: 890,
        shares: 345,
        comments: 156,
        country: "Spain",
        sentiment: Sentiment::Positive,
        url: "https://facebook.com/latinmusictoday",
    },
];

/// The five demonstration mentions, in their original order.
#[must_use]
pub fn sample_mentions() -> Vec<Mention> {
    SAMPLE_ROWS
        .iter()
        .map(|row| Mention {
            id: row.id.to_string(),
            platform: row.platform.to_string(),
            username: row.username.to_string(),
            post_date: row.post_date.to_string(),
            content: row.content.to_string(),
            estimated_views: row.estimated_views,
            likes: row.likes,
            shares: row.shares,
            comments: row.comments,
            country: row.country.to_string(),
            sentiment: row.sentiment,
            project: PROJECT_LABEL.to_string(),
            url: row.url.to_string(),
        })
        .collect()
}

/// Sorted, deduplicated country list derived from the sample records.
#[must_use]
pub fn sample_countries() -> Vec<String> {
    let mut countries: Vec<String> = SAMPLE_ROWS.iter().map(|r| r.country.to_string()).collect();
    countries.sort();
    countries.dedup();
    countries
}
