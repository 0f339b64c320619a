//! View models for the filter panel.
//!
//! Each control is a pure function of the slice of [`FilterState`] it owns.
//! Every clickable option carries the [`FilterAction`] it emits, so the
//! renderer only has to submit that action back to the dashboard.

use chrono::NaiveDate;
use serde::Serialize;

use crate::filters::{FilterAction, FilterState};
use crate::mention::{Sentiment, SortDirection, SortField};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRangeControl {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Minimum selectable end date: the chosen start date.
    pub end_min: Option<NaiveDate>,
}

impl DateRangeControl {
    #[must_use]
    pub fn new(filters: &FilterState) -> Self {
        Self {
            start_date: filters.date_range.start_date,
            end_date: filters.date_range.end_date,
            end_min: filters.date_range.start_date,
        }
    }

    /// Both pickers report the pair, whichever one changed.
    #[must_use]
    pub fn change(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> FilterAction {
        FilterAction::SetDateRange {
            start_date,
            end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub country: String,
    pub selected: bool,
    pub action: FilterAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryControl {
    pub label: String,
    pub options: Vec<CountryOption>,
    pub clear: FilterAction,
}

impl CountryControl {
    #[must_use]
    pub fn new(filters: &FilterState, available: &[String]) -> Self {
        let label = if filters.countries.is_empty() {
            "All Countries".to_string()
        } else {
            format!("{} Selected", filters.countries.len())
        };
        let options = available
            .iter()
            .map(|country| CountryOption {
                country: country.clone(),
                selected: filters.countries.contains(country),
                action: FilterAction::ToggleCountry {
                    country: country.clone(),
                },
            })
            .collect();
        Self {
            label,
            options,
            clear: FilterAction::ClearCountries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentButton {
    pub sentiment: Sentiment,
    pub label: &'static str,
    pub color: &'static str,
    pub selected: bool,
    pub action: FilterAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentControl {
    pub buttons: Vec<SentimentButton>,
}

impl SentimentControl {
    #[must_use]
    pub fn new(filters: &FilterState) -> Self {
        let buttons = Sentiment::ALL
            .into_iter()
            .map(|sentiment| SentimentButton {
                sentiment,
                label: sentiment.as_str(),
                color: sentiment.color(),
                selected: filters.sentiment.contains(&sentiment),
                action: FilterAction::ToggleSentiment { sentiment },
            })
            .collect();
        Self { buttons }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortChoice {
    pub field: SortField,
    pub label: &'static str,
    pub active: bool,
    /// Direction arrow, only on the active choice.
    pub arrow: Option<&'static str>,
    pub action: FilterAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortControl {
    pub choices: Vec<SortChoice>,
    pub direction: SortDirection,
}

impl SortControl {
    #[must_use]
    pub fn new(filters: &FilterState) -> Self {
        let choices = SortField::ALL
            .into_iter()
            .map(|field| {
                let active = filters.sort_by == Some(field);
                SortChoice {
                    field,
                    label: field.label(),
                    active,
                    arrow: active.then(|| filters.sort_direction.arrow()),
                    action: FilterAction::SelectSort { field },
                }
            })
            .collect();
        Self {
            choices,
            direction: filters.sort_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPanel {
    pub date_range: DateRangeControl,
    pub sort: SortControl,
    pub country: CountryControl,
    pub sentiment: SentimentControl,
    pub reset: FilterAction,
}

impl FilterPanel {
    #[must_use]
    pub fn new(filters: &FilterState, countries: &[String]) -> Self {
        Self {
            date_range: DateRangeControl::new(filters),
            sort: SortControl::new(filters),
            country: CountryControl::new(filters, countries),
            sentiment: SentimentControl::new(filters),
            reset: FilterAction::Reset,
        }
    }
}
