//! Root of the dashboard: owns the filter state, the loading flag and the
//! current result set, and re-fetches whenever the filters change.
//!
//! Every fetch is tagged with a generation number. A response is applied only
//! if no newer fetch has started since, so a slow reply can never overwrite
//! the rows of a later filter change.

use std::sync::Arc;

use mentiondb_backend::MentionStore;
use mentiondb_core::{FilterAction, FilterState, Mention};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct DashboardState {
    filters: FilterState,
    loading: bool,
    data: Vec<Mention>,
    countries: Vec<String>,
    generation: u64,
}

/// Point-in-time copy of what the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub filters: FilterState,
    pub loading: bool,
    pub data: Vec<Mention>,
    pub countries: Vec<String>,
    pub backend: &'static str,
}

pub struct Dashboard {
    store: MentionStore,
    state: RwLock<DashboardState>,
}

impl Dashboard {
    /// A dashboard that has not fetched anything yet. It reports `loading`
    /// until [`Dashboard::mount`] has completed its first fetch.
    #[must_use]
    pub fn new(store: MentionStore) -> Self {
        Self {
            store,
            state: RwLock::new(DashboardState {
                loading: true,
                ..DashboardState::default()
            }),
        }
    }

    #[must_use]
    pub fn backend_mode(&self) -> &'static str {
        self.store.mode()
    }

    /// The store rows are read from. Used by the stateless query endpoints.
    #[must_use]
    pub fn store(&self) -> &MentionStore {
        &self.store
    }

    /// Initial load: fetch with the default filters and populate the country
    /// options. Returns the handle of the spawned work.
    pub async fn mount(self: &Arc<Self>) -> JoinHandle<()> {
        let (filters, generation) = self.begin_fetch(None).await;
        self.spawn_fetch(filters, generation)
    }

    /// Merges `action` into the filters, marks the dashboard loading and
    /// starts a fetch for the new state. The country lookup is retried
    /// alongside while no options have loaded yet.
    pub async fn dispatch(self: &Arc<Self>, action: FilterAction) -> JoinHandle<()> {
        let (filters, generation) = self.begin_fetch(Some(action)).await;
        self.spawn_fetch(filters, generation)
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.read().await;
        DashboardSnapshot {
            filters: state.filters.clone(),
            loading: state.loading,
            data: state.data.clone(),
            countries: state.countries.clone(),
            backend: self.store.mode(),
        }
    }

    async fn begin_fetch(&self, action: Option<FilterAction>) -> (FilterState, u64) {
        let mut state = self.state.write().await;
        if let Some(action) = action {
            let current = std::mem::take(&mut state.filters);
            state.filters = current.apply(action);
        }
        state.loading = true;
        state.generation += 1;
        tracing::debug!(generation = state.generation, filters = ?state.filters, "fetching mentions");
        (state.filters.clone(), state.generation)
    }

    fn spawn_fetch(self: &Arc<Self>, filters: FilterState, generation: u64) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let missing_countries = this.state.read().await.countries.is_empty();
            let (rows, countries) = tokio::join!(this.store.fetch_mentions(&filters), async {
                if missing_countries {
                    this.store.list_countries().await
                } else {
                    Vec::new()
                }
            });
            if !countries.is_empty() {
                this.state.write().await.countries = countries;
            }
            this.complete(generation, rows).await;
        })
    }

    /// Stores `rows` if `generation` is still the latest fetch. Returns
    /// whether the rows were applied.
    async fn complete(&self, generation: u64, rows: Vec<Mention>) -> bool {
        let mut state = self.state.write().await;
        if generation != state.generation {
            tracing::warn!(
                generation,
                latest = state.generation,
                "discarding stale mentions response"
            );
            return false;
        }
        tracing::info!(count = rows.len(), generation, "mentions loaded");
        state.data = rows;
        state.loading = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mentiondb_backend::BackendClient;
    use mentiondb_core::{sample_mentions, Sentiment};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sample_dashboard(delay_ms: u64) -> Arc<Dashboard> {
        Arc::new(Dashboard::new(MentionStore::sample(Duration::from_millis(
            delay_ms,
        ))))
    }

    #[tokio::test]
    async fn new_dashboard_starts_loading_with_default_filters() {
        let dashboard = sample_dashboard(0);
        let snapshot = dashboard.snapshot().await;
        assert!(snapshot.loading);
        assert!(snapshot.data.is_empty());
        assert_eq!(snapshot.filters, FilterState::default());
        assert_eq!(snapshot.backend, "sample");
    }

    #[tokio::test(start_paused = true)]
    async fn mount_without_backend_serves_sample_after_delay() {
        let dashboard = sample_dashboard(1000);
        let handle = dashboard.mount().await;

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(dashboard.snapshot().await.loading);

        handle.await.expect("mount task");
        let snapshot = dashboard.snapshot().await;
        assert!(!snapshot.loading);
        assert_eq!(snapshot.data.len(), 5);
        assert_eq!(snapshot.countries.len(), 5);
    }

    #[tokio::test]
    async fn dispatch_applies_action_and_refetches() {
        let dashboard = sample_dashboard(0);
        dashboard.mount().await.await.expect("mount");

        let handle = dashboard
            .dispatch(FilterAction::ToggleSentiment {
                sentiment: Sentiment::Negative,
            })
            .await;
        assert!(dashboard.snapshot().await.loading);
        handle.await.expect("fetch task");

        let snapshot = dashboard.snapshot().await;
        assert!(!snapshot.loading);
        assert!(snapshot.filters.sentiment.contains(&Sentiment::Negative));
        assert_eq!(snapshot.data.len(), 1);
        assert_eq!(snapshot.data[0].id, "4");
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let dashboard = sample_dashboard(0);
        let (_, first) = dashboard.begin_fetch(None).await;
        let (_, second) = dashboard.begin_fetch(Some(FilterAction::Reset)).await;
        assert!(second > first);

        assert!(dashboard.complete(second, Vec::new()).await);
        assert!(!dashboard.complete(first, sample_mentions()).await);

        let snapshot = dashboard.snapshot().await;
        assert!(snapshot.data.is_empty());
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn older_response_does_not_clear_loading_for_newer_fetch() {
        let dashboard = sample_dashboard(0);
        let (_, first) = dashboard.begin_fetch(None).await;
        let (_, _second) = dashboard.begin_fetch(None).await;

        assert!(!dashboard.complete(first, sample_mentions()).await);
        assert!(dashboard.snapshot().await.loading);
    }

    #[tokio::test]
    async fn reset_restores_defaults() {
        let dashboard = sample_dashboard(0);
        dashboard
            .dispatch(FilterAction::ToggleCountry {
                country: "Mexico".to_string(),
            })
            .await
            .await
            .expect("fetch");
        dashboard
            .dispatch(FilterAction::Reset)
            .await
            .await
            .expect("fetch");

        let snapshot = dashboard.snapshot().await;
        assert_eq!(snapshot.filters, FilterState::default());
        assert_eq!(snapshot.data.len(), 5);
    }

    #[tokio::test]
    async fn country_lookup_is_retried_until_it_succeeds() {
        let server = MockServer::start().await;
        // Mounted first so it answers the first lookup, then expires.
        Mock::given(method("GET"))
            .and(path("/rest/v1/DATA_PALF_PR"))
            .and(query_param("select", "Country"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/DATA_PALF_PR"))
            .and(query_param("select", "Country"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "Country": "Mexico" }])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/DATA_PALF_PR"))
            .and(query_param("select", "*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = BackendClient::with_base_url(&server.uri(), "test-key", "DATA_PALF_PR", 30)
            .expect("client");
        let dashboard = Arc::new(Dashboard::new(MentionStore::Live(client)));

        dashboard.mount().await.await.expect("mount");
        let snapshot = dashboard.snapshot().await;
        assert!(!snapshot.loading);
        assert!(snapshot.countries.is_empty());

        dashboard
            .dispatch(FilterAction::Reset)
            .await
            .await
            .expect("fetch");
        assert_eq!(dashboard.snapshot().await.countries, vec!["Mexico".to_string()]);

        // Once loaded, later fetches leave the options alone.
        dashboard
            .dispatch(FilterAction::Reset)
            .await
            .await
            .expect("fetch");
        let country_requests = server
            .received_requests()
            .await
            .expect("recorded requests")
            .iter()
            .filter(|r| r.url.query_pairs().any(|(k, v)| k == "select" && v == "Country"))
            .count();
        assert_eq!(country_requests, 2);
    }
}
