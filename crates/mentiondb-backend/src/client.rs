//! HTTP client for the hosted mentions table (PostgREST API).
//!
//! Wraps `reqwest` with the backend's key headers, query construction and row
//! mapping. The `try_*` methods surface [`BackendError`]; the plain methods
//! log failures and degrade to an empty list so the dashboard stays usable.

use std::time::Duration;

use mentiondb_core::{BackendConfig, FilterState, Mention};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};

use crate::error::BackendError;
use crate::query::MentionQuery;
use crate::row::{distinct_countries, PalfRowAdapter, RawRow, RowAdapter};

const REST_PREFIX: &str = "rest/v1/";

/// Client for the mentions table.
///
/// Use [`BackendClient::new`] with the loaded configuration or
/// [`BackendClient::with_base_url`] to point at a mock server in tests.
pub struct BackendClient {
    client: Client,
    base_url: Url,
    table: String,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`BackendError::InvalidUrl`] for a malformed endpoint/key.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        Self::with_base_url(
            &config.url,
            &config.key,
            &config.table,
            config.request_timeout_secs,
        )
    }

    /// Creates a client with explicit endpoint, key and table.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`BackendError::InvalidUrl`] if `base_url` does not parse or
    /// `key` is not a valid header value.
    pub fn with_base_url(
        base_url: &str,
        key: &str,
        table: &str,
        timeout_secs: u64,
    ) -> Result<Self, BackendError> {
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| BackendError::InvalidUrl(format!("invalid access key: {e}")))?;
        let apikey = HeaderValue::from_str(key)
            .map_err(|e| BackendError::InvalidUrl(format!("invalid access key: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("mentiondb/0.1 (dashboard)")
            .default_headers(headers)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| BackendError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            table: table.to_owned(),
        })
    }

    /// Mention rows matching `filters`, or an empty list on any backend error.
    pub async fn fetch_mentions(&self, filters: &FilterState) -> Vec<Mention> {
        match self.try_fetch_mentions(filters).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(error = %e, table = %self.table, "error fetching mentions");
                Vec::new()
            }
        }
    }

    /// Mention rows matching `filters`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::Status`] if the backend rejects the query.
    /// - [`BackendError::Deserialize`] if the body is not a JSON array of rows.
    pub async fn try_fetch_mentions(
        &self,
        filters: &FilterState,
    ) -> Result<Vec<Mention>, BackendError> {
        let query = MentionQuery::from_filters(filters);
        let rows = self.request_rows(&query).await?;
        let adapter = PalfRowAdapter;
        let mentions: Vec<Mention> = rows.iter().map(|row| adapter.to_mention(row)).collect();
        tracing::debug!(count = mentions.len(), "fetched mentions");
        Ok(mentions)
    }

    /// Sorted distinct countries, or an empty list on any backend error.
    pub async fn list_countries(&self) -> Vec<String> {
        match self.try_list_countries().await {
            Ok(countries) => countries,
            Err(e) => {
                tracing::error!(error = %e, table = %self.table, "error fetching unique countries");
                Vec::new()
            }
        }
    }

    /// Sorted distinct, non-empty country values.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::try_fetch_mentions`].
    pub async fn try_list_countries(&self) -> Result<Vec<String>, BackendError> {
        let rows = self.request_rows(&MentionQuery::countries()).await?;
        Ok(distinct_countries(&rows))
    }

    /// Builds the table URL with percent-encoded query pairs.
    fn build_url(&self, query: &MentionQuery) -> Result<Url, BackendError> {
        let mut url = self
            .base_url
            .join(REST_PREFIX)
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(format!("'{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(&self.table);
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query.pairs() {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn request_rows(&self, query: &MentionQuery) -> Result<Vec<RawRow>, BackendError> {
        let url = self.build_url(query)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
