//! Translation of a [`FilterState`] into PostgREST query-string pairs.

use chrono::Days;
use mentiondb_core::{FilterState, SortField};

use crate::row::columns;

/// Query-string pairs for one `GET /rest/v1/{table}` request, in the order
/// they are appended to the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    pairs: Vec<(String, String)>,
}

impl MentionQuery {
    /// Full mention rows restricted and ordered by `filters`.
    #[must_use]
    pub fn from_filters(filters: &FilterState) -> Self {
        let mut pairs = vec![("select".to_string(), "*".to_string())];

        if let Some((start, end)) = filters.date_range.bounds() {
            pairs.push((columns::DATE.to_string(), format!("gte.{start}")));
            // Whole end day included: compare against the following midnight.
            let upper = match end.checked_add_days(Days::new(1)) {
                Some(next) => format!("lt.{next}"),
                None => format!("lte.{end}"),
            };
            pairs.push((columns::DATE.to_string(), upper));
        }

        if !filters.countries.is_empty() {
            pairs.push((
                columns::COUNTRY.to_string(),
                in_list(filters.countries.iter().map(String::as_str)),
            ));
        }

        if !filters.sentiment.is_empty() {
            pairs.push((
                columns::SENTIMENT.to_string(),
                in_list(filters.sentiment.iter().map(|s| s.as_str())),
            ));
        }

        let (field, direction) = filters.effective_sort();
        let suffix = if direction.is_ascending() { "asc" } else { "desc" };
        pairs.push((
            "order".to_string(),
            format!("{}.{suffix}", sort_column(field)),
        ));

        Self { pairs }
    }

    /// Only the country column, for the distinct-value lookup.
    #[must_use]
    pub fn countries() -> Self {
        Self {
            pairs: vec![("select".to_string(), columns::COUNTRY.to_string())],
        }
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first pair named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Backend column holding each fetch-time sort field.
#[must_use]
pub fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::EstimatedViews => columns::ESTIMATED_VIEWS,
        SortField::PostDate => columns::DATE,
        SortField::Likes => columns::ENGAGEMENT,
    }
}

/// `in.("a","b")` with every value quoted so commas and parentheses inside
/// values stay literal.
fn in_list<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = values
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mentiondb_core::{FilterAction, Sentiment};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn default_filters_select_all_sorted_by_views_desc() {
        let q = MentionQuery::from_filters(&FilterState::default());
        assert_eq!(
            q.pairs(),
            &[
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "Estimated Views.desc".to_string()),
            ]
        );
    }

    #[test]
    fn empty_country_set_adds_no_country_restriction() {
        let q = MentionQuery::from_filters(&FilterState::default());
        assert_eq!(q.get("Country"), None);
        assert_eq!(q.get("Sentiment"), None);
        assert_eq!(q.get("Date"), None);
    }

    #[test]
    fn countries_and_sentiments_become_in_lists() {
        let filters = FilterState::default()
            .apply(FilterAction::ToggleCountry {
                country: "Mexico".to_string(),
            })
            .apply(FilterAction::ToggleCountry {
                country: "Brazil".to_string(),
            })
            .apply(FilterAction::ToggleSentiment {
                sentiment: Sentiment::Positive,
            });
        let q = MentionQuery::from_filters(&filters);
        assert_eq!(q.get("Country"), Some(r#"in.("Brazil","Mexico")"#));
        assert_eq!(q.get("Sentiment"), Some(r#"in.("Positive")"#));
    }

    #[test]
    fn in_list_escapes_quotes_and_backslashes() {
        let filters = FilterState::default().apply(FilterAction::ToggleCountry {
            country: r#"Côte "d" \Ivoire"#.to_string(),
        });
        let q = MentionQuery::from_filters(&filters);
        assert_eq!(q.get("Country"), Some(r#"in.("Côte \"d\" \\Ivoire")"#));
    }

    #[test]
    fn date_range_covers_whole_end_day() {
        let filters = FilterState::default().apply(FilterAction::SetDateRange {
            start_date: Some(date("2025-03-01")),
            end_date: Some(date("2025-03-31")),
        });
        let q = MentionQuery::from_filters(&filters);
        let dates: Vec<&str> = q
            .pairs()
            .iter()
            .filter(|(k, _)| k == "Date")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(dates, vec!["gte.2025-03-01", "lt.2025-04-01"]);
    }

    #[test]
    fn single_date_bound_is_ignored() {
        let filters = FilterState::default().apply(FilterAction::SetDateRange {
            start_date: None,
            end_date: Some(date("2025-03-31")),
        });
        assert_eq!(MentionQuery::from_filters(&filters).get("Date"), None);
    }

    #[test]
    fn exactly_one_order_pair_per_sort_field() {
        for (field, column) in [
            (SortField::EstimatedViews, "Estimated Views"),
            (SortField::PostDate, "Date"),
            (SortField::Likes, "Engagement"),
        ] {
            let filters = FilterState {
                sort_by: Some(field),
                ..FilterState::default()
            }
            .apply(FilterAction::SelectSort { field });
            let q = MentionQuery::from_filters(&filters);
            let orders: Vec<_> = q.pairs().iter().filter(|(k, _)| k == "order").collect();
            assert_eq!(orders.len(), 1);
            assert_eq!(orders[0].1, format!("{column}.asc"));
        }
    }

    #[test]
    fn unset_sort_orders_by_date_descending() {
        let filters = FilterState {
            sort_by: None,
            ..FilterState::default()
        };
        assert_eq!(
            MentionQuery::from_filters(&filters).get("order"),
            Some("Date.desc")
        );
    }

    #[test]
    fn countries_query_selects_only_country() {
        assert_eq!(
            MentionQuery::countries().pairs(),
            &[("select".to_string(), "Country".to_string())]
        );
    }
}
