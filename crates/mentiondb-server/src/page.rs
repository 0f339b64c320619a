//! The browser dashboard.
//!
//! `GET /` renders the filter panel and the result table from the current
//! dashboard snapshot. Filter controls are small forms posting to
//! `POST /filters`, which dispatches one [`FilterAction`] and redirects back.
//! The table's own sort and pagination live in the page URL, so they never
//! trigger a re-fetch.

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Extension, Form, Router,
};
use chrono::NaiveDate;
use mentiondb_core::table::{DEFAULT_PAGE_SIZE, PAGE_SIZES};
use mentiondb_core::{
    Column, ColumnSort, FilterAction, FilterPanel, Sentiment, SortField, TableState, TableView,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::dashboard::DashboardSnapshot;
use crate::middleware::RequestId;
use crate::templates::{render_template, DASHBOARD};

const TITLE: &str = "Mentions Data Hub";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_dashboard))
        .route("/filters", post(submit_filter))
}

/// Table state as carried in the page URL. `page` is one-based.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TableQuery {
    pub sort: Option<String>,
    pub desc: Option<bool>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl TableQuery {
    /// Unknown or unsortable columns are ignored; unsupported page sizes fall
    /// back to the default. The page index is clamped when rendering.
    pub(crate) fn table_state(&self) -> TableState {
        let mut state =
            TableState::default().with_page_size(self.size.unwrap_or(DEFAULT_PAGE_SIZE));
        state.sort = self
            .sort
            .as_deref()
            .and_then(Column::from_key)
            .filter(|column| column.is_sortable())
            .map(|column| ColumnSort {
                column,
                descending: self.desc.unwrap_or(false),
            });
        state.page_index = self.page.unwrap_or(1).saturating_sub(1);
        state
    }
}

/// Query parameters reproducing `state`, defaults omitted.
fn table_params(state: &TableState) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(sort) = state.sort {
        params.push(("sort", sort.column.key().to_string()));
        params.push(("desc", sort.descending.to_string()));
    }
    if state.page_index > 0 {
        params.push(("page", (state.page_index + 1).to_string()));
    }
    if state.page_size != DEFAULT_PAGE_SIZE {
        params.push(("size", state.page_size.to_string()));
    }
    params
}

/// Page URL for `state`. Keys and values are plain ASCII, no escaping needed.
fn table_href(state: &TableState) -> String {
    let params = table_params(state);
    if params.is_empty() {
        return "/".to_string();
    }
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("/?{}", query.join("&"))
}

#[derive(Debug, Serialize)]
struct HeaderLink {
    label: &'static str,
    href: Option<String>,
    indicator: &'static str,
}

#[derive(Debug, Serialize)]
struct Pager {
    label: String,
    first: Option<String>,
    previous: Option<String>,
    next: Option<String>,
    last: Option<String>,
}

#[derive(Debug, Serialize)]
struct PageSizeOption {
    size: usize,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct PageContext {
    title: &'static str,
    loading: bool,
    backend: &'static str,
    panel: FilterPanel,
    table: TableView,
    headers: Vec<HeaderLink>,
    pager: Option<Pager>,
    page_sizes: Vec<PageSizeOption>,
    /// Table state echoed through filter forms so a filter change keeps the
    /// visible sort and page size (the page resets to the first).
    carry: Vec<(&'static str, String)>,
    /// Sort-only state for the page-size form.
    sort_params: Vec<(&'static str, String)>,
}

impl PageContext {
    fn build(snapshot: &DashboardSnapshot, table_state: TableState) -> Self {
        let total = snapshot.data.len();
        let state = table_state.goto_page(table_state.page_index, total);

        let headers = Column::ALL
            .into_iter()
            .map(|column| {
                let sorted = state.sort.filter(|s| s.column == column);
                HeaderLink {
                    label: column.header(),
                    href: column
                        .is_sortable()
                        .then(|| table_href(&state.toggle_sort(column))),
                    indicator: match sorted {
                        Some(s) if s.descending => "▼",
                        Some(_) => "▲",
                        None => "",
                    },
                }
            })
            .collect();

        let pagination = state.pagination(total);
        let pager = (!snapshot.loading && total > 0).then(|| Pager {
            label: pagination.label(),
            first: pagination
                .can_previous
                .then(|| table_href(&state.first_page())),
            previous: pagination
                .can_previous
                .then(|| table_href(&state.previous_page())),
            next: pagination
                .can_next
                .then(|| table_href(&state.next_page(total))),
            last: pagination
                .can_next
                .then(|| table_href(&state.last_page(total))),
        });

        let page_sizes = PAGE_SIZES
            .into_iter()
            .map(|size| PageSizeOption {
                size,
                selected: size == state.page_size,
            })
            .collect();

        let carried = TableState {
            page_index: 0,
            ..state
        };
        let sort_only = TableState {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            ..state
        };

        Self {
            title: TITLE,
            loading: snapshot.loading,
            backend: snapshot.backend,
            panel: FilterPanel::new(&snapshot.filters, &snapshot.countries),
            table: TableView::build(&snapshot.data, snapshot.loading, &state),
            headers,
            pager,
            page_sizes,
            carry: table_params(&carried),
            sort_params: table_params(&sort_only),
        }
    }
}

async fn show_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    query: Result<Query<TableQuery>, QueryRejection>,
) -> Result<Html<String>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::bad_request(req_id.0.clone(), e.body_text()))?;

    let snapshot = state.dashboard.snapshot().await;
    let ctx = PageContext::build(&snapshot, query.table_state());

    render_template(DASHBOARD, &ctx).map(Html).map_err(|e| {
        tracing::error!(error = %e, "dashboard render failed");
        ApiError::new(req_id.0, "internal_error", "failed to render dashboard")
    })
}

/// One filter control's submission. `type` names the [`FilterAction`]; the
/// other fields are read according to it. Table fields are carried through
/// to the redirect.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterForm {
    #[serde(rename = "type")]
    pub kind: String,
    pub country: Option<String>,
    pub sentiment: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort: Option<String>,
    pub desc: Option<bool>,
    pub size: Option<usize>,
}

impl FilterForm {
    pub(crate) fn to_action(&self) -> Result<FilterAction, String> {
        match self.kind.as_str() {
            "set_date_range" => Ok(FilterAction::SetDateRange {
                start_date: form_date("start_date", self.start_date.as_deref())?,
                end_date: form_date("end_date", self.end_date.as_deref())?,
            }),
            "toggle_country" => {
                let country = required("country", self.country.as_deref())?;
                Ok(FilterAction::ToggleCountry {
                    country: country.to_string(),
                })
            }
            "clear_countries" => Ok(FilterAction::ClearCountries),
            "toggle_sentiment" => {
                let raw = required("sentiment", self.sentiment.as_deref())?;
                let sentiment: Sentiment = raw.parse().map_err(|e| format!("sentiment: {e}"))?;
                Ok(FilterAction::ToggleSentiment { sentiment })
            }
            "select_sort" => {
                let raw = required("field", self.field.as_deref())?;
                let field: SortField = raw.parse().map_err(|e| format!("field: {e}"))?;
                Ok(FilterAction::SelectSort { field })
            }
            "reset" => Ok(FilterAction::Reset),
            other => Err(format!("unknown filter action: '{other}'")),
        }
    }

    /// Where to send the browser afterwards: the dashboard with the same
    /// visible sort and page size, back on the first page.
    pub(crate) fn redirect_target(&self) -> String {
        let state = TableQuery {
            sort: self.sort.clone(),
            desc: self.desc,
            page: None,
            size: self.size,
        }
        .table_state();
        table_href(&state)
    }
}

fn required<'a>(name: &str, raw: Option<&'a str>) -> Result<&'a str, String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing field '{name}'"))
}

/// Date inputs post an empty string when cleared.
fn form_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| format!("{name}: expected YYYY-MM-DD, got '{s}' ({e})")),
    }
}

async fn submit_filter(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    form: Result<Form<FilterForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::bad_request(req_id.0.clone(), e.body_text()))?;
    let action = form
        .to_action()
        .map_err(|msg| ApiError::bad_request(req_id.0.clone(), msg))?;

    tracing::info!(?action, "filter form submitted");
    drop(state.dashboard.dispatch(action).await);

    Ok(Redirect::to(&form.redirect_target()))
}
