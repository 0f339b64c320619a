//! Where the dashboard's rows come from: the live backend, or the built-in
//! sample dataset when no backend is configured.

use std::time::Duration;

use mentiondb_core::{apply_filters, sample_countries, sample_mentions, FilterState, Mention};

use crate::client::BackendClient;

pub enum MentionStore {
    Live(BackendClient),
    Sample { delay: Duration },
}

impl MentionStore {
    #[must_use]
    pub fn sample(delay: Duration) -> Self {
        MentionStore::Sample { delay }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, MentionStore::Live(_))
    }

    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            MentionStore::Live(_) => "live",
            MentionStore::Sample { .. } => "sample",
        }
    }

    /// Rows for `filters`. Never fails: backend errors come back as an empty
    /// list. The sample store answers after its configured delay.
    pub async fn fetch_mentions(&self, filters: &FilterState) -> Vec<Mention> {
        match self {
            MentionStore::Live(client) => client.fetch_mentions(filters).await,
            MentionStore::Sample { delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                apply_filters(&sample_mentions(), filters)
            }
        }
    }

    pub async fn list_countries(&self) -> Vec<String> {
        match self {
            MentionStore::Live(client) => client.list_countries().await,
            MentionStore::Sample { .. } => sample_countries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mentiondb_core::{FilterAction, Sentiment};

    use super::*;

    #[tokio::test]
    async fn sample_store_returns_all_five_with_default_filters() {
        let store = MentionStore::sample(Duration::ZERO);
        assert!(!store.is_live());
        assert_eq!(store.mode(), "sample");
        let rows = store.fetch_mentions(&FilterState::default()).await;
        assert_eq!(rows.len(), 5);
    }

    #[tokio::test]
    async fn sample_store_applies_filters() {
        let store = MentionStore::sample(Duration::ZERO);
        let filters = FilterState::default().apply(FilterAction::ToggleSentiment {
            sentiment: Sentiment::Negative,
        });
        let rows = store.fetch_mentions(&filters).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "4");
    }

    #[tokio::test(start_paused = true)]
    async fn sample_store_waits_for_its_delay() {
        let store = MentionStore::sample(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        let rows = store.fetch_mentions(&FilterState::default()).await;
        assert_eq!(rows.len(), 5);
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn sample_store_lists_sorted_countries() {
        let countries = MentionStore::sample(Duration::ZERO).list_countries().await;
        assert_eq!(countries.len(), 5);
        assert!(countries.windows(2).all(|w| w[0] < w[1]));
    }
}
