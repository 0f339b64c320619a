//! Result table: client-side sort and pagination layered over the rows the
//! fetch returned, plus the per-cell presentation.
//!
//! Rows arrive already filtered and ordered by the fetch-time sort. The
//! visible sort, when a header has been clicked, is a stable sort over that
//! order and always wins for display.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::format::{format_count, format_post_date};
use crate::mention::Mention;

pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Platform,
    Date,
    Username,
    Content,
    Views,
    Engagement,
    Country,
    Sentiment,
    Link,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::Platform,
        Column::Date,
        Column::Username,
        Column::Content,
        Column::Views,
        Column::Engagement,
        Column::Country,
        Column::Sentiment,
        Column::Link,
    ];

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Column::Platform => "Platform",
            Column::Date => "Date",
            Column::Username => "Username",
            Column::Content => "Content",
            Column::Views => "Views",
            Column::Engagement => "Engagement",
            Column::Country => "Country",
            Column::Sentiment => "Sentiment",
            Column::Link => "Link",
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Column::Platform => "platform",
            Column::Date => "date",
            Column::Username => "username",
            Column::Content => "content",
            Column::Views => "views",
            Column::Engagement => "engagement",
            Column::Country => "country",
            Column::Sentiment => "sentiment",
            Column::Link => "link",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Engagement is a composite of three counters with no single order.
    #[must_use]
    pub fn is_sortable(self) -> bool {
        !matches!(self, Column::Engagement)
    }

    fn compare(self, a: &Mention, b: &Mention) -> Ordering {
        match self {
            Column::Platform => a.platform.cmp(&b.platform),
            Column::Date => a.post_date.cmp(&b.post_date),
            Column::Username => a.username.cmp(&b.username),
            Column::Content => a.content.cmp(&b.content),
            Column::Views => a.estimated_views.cmp(&b.estimated_views),
            Column::Country => a.country.cmp(&b.country),
            Column::Sentiment => a.sentiment.cmp(&b.sentiment),
            Column::Link => a.url.cmp(&b.url),
            Column::Engagement => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub column: Column,
    pub descending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sort: Option<ColumnSort>,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    /// Header click: a new column sorts ascending, the same column toggles.
    #[must_use]
    pub fn toggle_sort(mut self, column: Column) -> Self {
        if !column.is_sortable() {
            return self;
        }
        self.sort = Some(match self.sort {
            Some(current) if current.column == column => ColumnSort {
                column,
                descending: !current.descending,
            },
            _ => ColumnSort {
                column,
                descending: false,
            },
        });
        self.page_index = 0;
        self
    }

    /// Page sizes outside [`PAGE_SIZES`] fall back to the default.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = normalize_page_size(size);
        self.page_index = 0;
        self
    }

    #[must_use]
    pub fn goto_page(mut self, page_index: usize, total_rows: usize) -> Self {
        let last = page_count(total_rows, self.page_size) - 1;
        self.page_index = page_index.min(last);
        self
    }

    #[must_use]
    pub fn first_page(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }

    #[must_use]
    pub fn previous_page(self) -> Self {
        Self {
            page_index: self.page_index.saturating_sub(1),
            ..self
        }
    }

    #[must_use]
    pub fn next_page(self, total_rows: usize) -> Self {
        self.goto_page(self.page_index + 1, total_rows)
    }

    #[must_use]
    pub fn last_page(self, total_rows: usize) -> Self {
        self.goto_page(usize::MAX, total_rows)
    }

    #[must_use]
    pub fn pagination(&self, total_rows: usize) -> Pagination {
        let size = normalize_page_size(self.page_size);
        let page_count = page_count(total_rows, size);
        let page_index = self.page_index.min(page_count - 1);
        Pagination {
            page_index,
            page_count,
            page_size: size,
            can_previous: page_index > 0,
            can_next: page_index + 1 < page_count,
        }
    }
}

#[must_use]
pub fn normalize_page_size(size: usize) -> usize {
    if PAGE_SIZES.contains(&size) {
        size
    } else {
        DEFAULT_PAGE_SIZE
    }
}

/// Number of pages for `total_rows`; never less than one.
#[must_use]
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl Pagination {
    /// `Page X of Y`, one-based.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_index + 1, self.page_count)
    }
}

/// Applies the visible (header) sort over the fetch-time order.
#[must_use]
pub fn sort_rows<'a>(rows: &'a [Mention], sort: Option<ColumnSort>) -> Vec<&'a Mention> {
    let mut out: Vec<&Mention> = rows.iter().collect();
    if let Some(sort) = sort {
        out.sort_by(|a, b| {
            let ord = sort.column.compare(a, b);
            if sort.descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub platform: String,
    pub date: String,
    pub username: String,
    pub content: String,
    pub views: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub country: String,
    pub sentiment: &'static str,
    pub sentiment_color: &'static str,
    pub url: String,
}

impl RowView {
    #[must_use]
    pub fn from_mention(m: &Mention) -> Self {
        Self {
            platform: m.platform.clone(),
            date: format_post_date(&m.post_date),
            username: m.username.clone(),
            content: m.content.clone(),
            views: format_count(m.estimated_views),
            likes: format_count(m.likes),
            comments: format_count(m.comments),
            shares: format_count(m.shares),
            country: m.country.clone(),
            sentiment: m.sentiment.as_str(),
            sentiment_color: m.sentiment.color(),
            url: m.url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    /// `Some(true)` descending, `Some(false)` ascending, `None` unsorted.
    pub sorted_descending: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableView {
    Loading,
    Empty,
    Rows {
        headers: Vec<HeaderView>,
        rows: Vec<RowView>,
        pagination: Pagination,
        page_label: String,
        total_rows: usize,
    },
}

impl TableView {
    #[must_use]
    pub fn build(records: &[Mention], loading: bool, state: &TableState) -> Self {
        if loading {
            return TableView::Loading;
        }
        if records.is_empty() {
            return TableView::Empty;
        }

        let pagination = state.pagination(records.len());
        let sorted = sort_rows(records, state.sort);
        let start = pagination.page_index * pagination.page_size;
        let rows = sorted
            .into_iter()
            .skip(start)
            .take(pagination.page_size)
            .map(RowView::from_mention)
            .collect();

        let headers = Column::ALL
            .into_iter()
            .map(|column| HeaderView {
                key: column.key(),
                label: column.header(),
                sortable: column.is_sortable(),
                sorted_descending: state
                    .sort
                    .filter(|s| s.column == column)
                    .map(|s| s.descending),
            })
            .collect();

        TableView::Rows {
            headers,
            rows,
            page_label: pagination.label(),
            pagination,
            total_rows: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_mentions;

    fn many(n: usize) -> Vec<Mention> {
        let base = sample_mentions().remove(0);
        (0..n)
            .map(|i| Mention {
                id: i.to_string(),
                estimated_views: i as u64,
                ..base.clone()
            })
            .collect()
    }

    #[test]
    fn twenty_three_rows_make_three_pages_of_ten() {
        let records = many(23);
        let state = TableState::default();
        let first = state.pagination(records.len());
        assert_eq!(first.page_count, 3);
        assert!(!first.can_previous, "prev disabled on page 1");
        assert!(first.can_next);

        let last = state.last_page(records.len());
        let p = last.pagination(records.len());
        assert_eq!(p.page_index, 2);
        assert!(!p.can_next, "next disabled on page 3");
        assert!(p.can_previous);
        assert_eq!(p.label(), "Page 3 of 3");

        match TableView::build(&records, false, &last) {
            TableView::Rows { rows, .. } => assert_eq!(rows.len(), 3),
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn next_page_stops_at_last_page() {
        let state = TableState::default()
            .next_page(23)
            .next_page(23)
            .next_page(23);
        assert_eq!(state.page_index, 2);
        assert_eq!(state.previous_page().page_index, 1);
        assert_eq!(state.first_page().page_index, 0);
    }

    #[test]
    fn empty_table_still_has_one_page() {
        let p = TableState::default().pagination(0);
        assert_eq!(p.page_count, 1);
        assert!(!p.can_previous);
        assert!(!p.can_next);
    }

    #[test]
    fn unsupported_page_size_falls_back_to_default() {
        assert_eq!(TableState::default().with_page_size(25).page_size, 10);
        assert_eq!(TableState::default().with_page_size(50).page_size, 50);
        let state = TableState::default().next_page(100).with_page_size(20);
        assert_eq!(state.page_index, 0, "changing size returns to the first page");
    }

    #[test]
    fn header_click_cycles_ascending_then_descending() {
        let state = TableState::default().toggle_sort(Column::Views);
        assert_eq!(
            state.sort,
            Some(ColumnSort {
                column: Column::Views,
                descending: false
            })
        );
        let state = state.toggle_sort(Column::Views);
        assert_eq!(state.sort.map(|s| s.descending), Some(true));
        let state = state.toggle_sort(Column::Country);
        assert_eq!(
            state.sort,
            Some(ColumnSort {
                column: Column::Country,
                descending: false
            })
        );
    }

    #[test]
    fn engagement_column_is_not_sortable() {
        let state = TableState::default().toggle_sort(Column::Engagement);
        assert_eq!(state.sort, None);
    }

    #[test]
    fn link_column_sorts_by_url() {
        let state = TableState::default().toggle_sort(Column::Link);
        assert_eq!(
            state.sort,
            Some(ColumnSort {
                column: Column::Link,
                descending: false
            })
        );

        let rows = sample_mentions();
        let sorted = sort_rows(&rows, state.sort);
        assert!(sorted.windows(2).all(|w| w[0].url <= w[1].url));
        let descending = sort_rows(&rows, state.toggle_sort(Column::Link).sort);
        assert!(descending.windows(2).all(|w| w[0].url >= w[1].url));
    }

    #[test]
    fn visible_sort_overrides_fetch_order() {
        let rows = sample_mentions();
        let sorted = sort_rows(
            &rows,
            Some(ColumnSort {
                column: Column::Country,
                descending: false,
            }),
        );
        let countries: Vec<&str> = sorted.iter().map(|m| m.country.as_str()).collect();
        assert_eq!(
            countries,
            vec!["Argentina", "Brazil", "Colombia", "Mexico", "Spain"]
        );

        let untouched = sort_rows(&rows, None);
        let ids: Vec<&str> = untouched.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn loading_renders_no_rows() {
        assert_eq!(
            TableView::build(&sample_mentions(), true, &TableState::default()),
            TableView::Loading
        );
    }

    #[test]
    fn no_records_renders_empty_state() {
        assert_eq!(
            TableView::build(&[], false, &TableState::default()),
            TableView::Empty
        );
    }

    #[test]
    fn row_view_formats_cells() {
        let row = RowView::from_mention(&sample_mentions()[2]);
        assert_eq!(row.date, "Mar 29, 2025");
        assert_eq!(row.views, "45,000");
        assert_eq!(row.likes, "3,200");
        assert_eq!(row.shares, "1,800");
        assert_eq!(row.comments, "240");
        assert_eq!(row.sentiment_color, "green");
    }

    #[test]
    fn column_keys_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_key(column.key()), Some(column));
        }
        assert_eq!(Column::from_key("nope"), None);
    }
}
