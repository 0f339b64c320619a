//! Domain model for the mentions dashboard: records, filter state and its
//! reducer, filter-panel and result-table view models, and configuration.

pub mod app_config;
pub mod config;
pub mod controls;
pub mod filters;
pub mod format;
pub mod mention;
pub mod sample;
pub mod table;

pub use app_config::{AppConfig, BackendConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use controls::FilterPanel;
pub use filters::{apply_filters, DateRange, FilterAction, FilterState};
pub use mention::{
    Mention, Sentiment, SortDirection, SortField, UnknownSentiment, UnknownSortDirection,
    UnknownSortField, PROJECT_LABEL, UNKNOWN,
};
pub use sample::{sample_countries, sample_mentions};
pub use table::{Column, ColumnSort, TableState, TableView};
