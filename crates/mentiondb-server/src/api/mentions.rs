use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use mentiondb_core::{FilterAction, FilterState, Mention, Sentiment, SortDirection, SortField};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

/// Filter state spelled as query parameters. Lists are comma-separated.
///
/// `GET /api/v1/mentions?start_date=2025-03-01&end_date=2025-03-31&countries=Mexico,Spain&sentiment=positive&sort_by=likes&sort_direction=asc`
#[derive(Debug, Default, Deserialize)]
pub(super) struct MentionsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub countries: Option<String>,
    pub sentiment: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl MentionsQuery {
    /// Builds the filter state these parameters describe, starting from the
    /// defaults. Fails with a message naming the offending parameter.
    pub(super) fn into_filters(self) -> Result<FilterState, String> {
        let mut filters = FilterState::default().apply(FilterAction::SetDateRange {
            start_date: parse_date("start_date", self.start_date.as_deref())?,
            end_date: parse_date("end_date", self.end_date.as_deref())?,
        });

        for country in split_list(self.countries.as_deref()) {
            filters.countries.insert(country.to_string());
        }
        for raw in split_list(self.sentiment.as_deref()) {
            let sentiment: Sentiment = raw.parse().map_err(|e| format!("sentiment: {e}"))?;
            filters.sentiment.insert(sentiment);
        }
        if let Some(raw) = non_blank(self.sort_by.as_deref()) {
            let field: SortField = raw.parse().map_err(|e| format!("sort_by: {e}"))?;
            filters.sort_by = Some(field);
        }
        if let Some(raw) = non_blank(self.sort_direction.as_deref()) {
            let direction: SortDirection =
                raw.parse().map_err(|e| format!("sort_direction: {e}"))?;
            filters.sort_direction = direction;
        }
        Ok(filters)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    non_blank(raw)
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| format!("{name}: expected YYYY-MM-DD, got '{s}' ({e})"))
        })
        .transpose()
}

/// Stateless query: rows for the filters in the query string, in fetch-time
/// order. Does not touch the dashboard's own filter state.
pub(super) async fn list_mentions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<MentionsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Mention>>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request(req_id.0.clone(), e.body_text()))?;
    let filters = query
        .into_filters()
        .map_err(|msg| ApiError::bad_request(req_id.0.clone(), msg))?;

    let rows = state.dashboard.store().fetch_mentions(&filters).await;
    Ok(Json(ApiResponse::new(rows, req_id.0)))
}

pub(super) async fn list_countries(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    let countries = state.dashboard.store().list_countries().await;
    Json(ApiResponse::new(countries, req_id.0))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::super::build_app;
    use super::super::test_support::{body_json, sample_state};
    use super::*;

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = build_app(sample_state());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        (status, body_json(response).await)
    }

    fn ids(json: &serde_json::Value) -> Vec<&str> {
        json["data"]
            .as_array()
            .expect("data array")
            .iter()
            .filter_map(|m| m["id"].as_str())
            .collect()
    }

    #[test]
    fn empty_query_yields_default_filters() {
        let filters = MentionsQuery::default().into_filters().expect("filters");
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn query_lists_are_trimmed_and_split() {
        let filters = MentionsQuery {
            countries: Some(" Mexico , Spain,,".to_string()),
            sentiment: Some("positive,NEGATIVE".to_string()),
            ..MentionsQuery::default()
        }
        .into_filters()
        .expect("filters");
        assert_eq!(filters.countries.len(), 2);
        assert!(filters.countries.contains("Spain"));
        assert!(filters.sentiment.contains(&Sentiment::Negative));
    }

    #[test]
    fn end_before_start_is_dropped() {
        let filters = MentionsQuery {
            start_date: Some("2025-03-10".to_string()),
            end_date: Some("2025-03-01".to_string()),
            ..MentionsQuery::default()
        }
        .into_filters()
        .expect("filters");
        assert!(filters.date_range.start_date.is_some());
        assert!(filters.date_range.end_date.is_none());
    }

    #[test]
    fn bad_values_name_the_parameter() {
        let err = MentionsQuery {
            start_date: Some("03/01/2025".to_string()),
            ..MentionsQuery::default()
        }
        .into_filters()
        .expect_err("bad date");
        assert!(err.starts_with("start_date"), "{err}");

        let err = MentionsQuery {
            sort_by: Some("shares".to_string()),
            ..MentionsQuery::default()
        }
        .into_filters()
        .expect_err("bad sort field");
        assert!(err.starts_with("sort_by"), "{err}");
    }

    #[tokio::test]
    async fn mentions_default_order_is_views_descending() {
        let (status, json) = get("/api/v1/mentions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec!["3", "5", "1", "4", "2"]);
    }

    #[tokio::test]
    async fn mentions_filter_by_country_and_sentiment() {
        let (status, json) = get("/api/v1/mentions?countries=Mexico&sentiment=Positive").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec!["1"]);
    }

    #[tokio::test]
    async fn mentions_sort_by_likes_ascending() {
        let (_, json) = get("/api/v1/mentions?sort_by=likes&sort_direction=asc").await;
        assert_eq!(ids(&json), vec!["2", "4", "1", "5", "3"]);
    }

    #[tokio::test]
    async fn mentions_rejects_unknown_sentiment() {
        let (status, json) = get("/api/v1/mentions?sentiment=mixed").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn countries_lists_sample_countries() {
        let (status, json) = get("/api/v1/countries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().map(Vec::len), Some(5));
    }
}
