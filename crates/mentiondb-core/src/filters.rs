//! Filter state and the reducer that every filter control feeds into.
//!
//! The dashboard never mutates a [`FilterState`] in place: controls emit a
//! [`FilterAction`] and [`FilterState::apply`] returns the merged state.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mention::{Mention, Sentiment, SortDirection, SortField};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Both bounds, only when both are set. A half-open range does not filter.
    #[must_use]
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub date_range: DateRange,
    pub countries: BTreeSet<String>,
    pub sentiment: BTreeSet<Sentiment>,
    pub sort_by: Option<SortField>,
    pub sort_direction: SortDirection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            countries: BTreeSet::new(),
            sentiment: BTreeSet::new(),
            sort_by: Some(SortField::EstimatedViews),
            sort_direction: SortDirection::Desc,
        }
    }
}

/// A single change emitted by one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterAction {
    SetDateRange {
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    },
    ToggleCountry {
        country: String,
    },
    ClearCountries,
    ToggleSentiment {
        sentiment: Sentiment,
    },
    SelectSort {
        field: SortField,
    },
    Reset,
}

impl FilterState {
    /// Merges one control's change into the full state.
    #[must_use]
    pub fn apply(mut self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetDateRange {
                start_date,
                end_date,
            } => {
                // The end picker cannot go below the start date.
                let end_date = match (start_date, end_date) {
                    (Some(start), Some(end)) if end < start => None,
                    _ => end_date,
                };
                self.date_range = DateRange {
                    start_date,
                    end_date,
                };
            }
            FilterAction::ToggleCountry { country } => {
                if !self.countries.remove(&country) {
                    self.countries.insert(country);
                }
            }
            FilterAction::ClearCountries => self.countries.clear(),
            FilterAction::ToggleSentiment { sentiment } => {
                if !self.sentiment.remove(&sentiment) {
                    self.sentiment.insert(sentiment);
                }
            }
            FilterAction::SelectSort { field } => {
                if self.sort_by == Some(field) {
                    self.sort_direction = self.sort_direction.flipped();
                } else {
                    self.sort_by = Some(field);
                    self.sort_direction = SortDirection::Desc;
                }
            }
            FilterAction::Reset => return Self::default(),
        }
        self
    }

    /// Effective fetch-time sort. An unset field means newest first.
    #[must_use]
    pub fn effective_sort(&self) -> (SortField, SortDirection) {
        match self.sort_by {
            Some(field) => (field, self.sort_direction),
            None => (SortField::PostDate, SortDirection::Desc),
        }
    }

    /// Whether `mention` satisfies every active restriction.
    #[must_use]
    pub fn matches(&self, mention: &Mention) -> bool {
        if let Some((start, end)) = self.date_range.bounds() {
            let day = mention.post_day();
            let start = start.format("%Y-%m-%d").to_string();
            let end = end.format("%Y-%m-%d").to_string();
            if day < start.as_str() || day > end.as_str() {
                return false;
            }
        }
        if !self.countries.is_empty() && !self.countries.contains(&mention.country) {
            return false;
        }
        if !self.sentiment.is_empty() && !self.sentiment.contains(&mention.sentiment) {
            return false;
        }
        true
    }
}

/// In-process equivalent of the backend query: filter, then apply the single
/// fetch-time sort.
#[must_use]
pub fn apply_filters(mentions: &[Mention], filters: &FilterState) -> Vec<Mention> {
    let mut rows: Vec<Mention> = mentions
        .iter()
        .filter(|m| filters.matches(m))
        .cloned()
        .collect();

    let (field, direction) = filters.effective_sort();
    rows.sort_by(|a, b| {
        let ord = compare_by_field(a, b, field);
        if direction.is_ascending() {
            ord
        } else {
            ord.reverse()
        }
    });
    rows
}

fn compare_by_field(a: &Mention, b: &Mention, field: SortField) -> Ordering {
    match field {
        SortField::EstimatedViews => a.estimated_views.cmp(&b.estimated_views),
        SortField::PostDate => a.post_date.cmp(&b.post_date),
        SortField::Likes => a.likes.cmp(&b.likes),
    }
}
