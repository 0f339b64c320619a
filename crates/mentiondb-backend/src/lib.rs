//! Backend access for the mentions dashboard.
//!
//! Turns a [`mentiondb_core::FilterState`] into one filtered, sorted SELECT
//! against the hosted mentions table, maps raw rows into
//! [`mentiondb_core::Mention`] records, and looks up the distinct country
//! values for the country filter.

pub mod client;
pub mod error;
pub mod query;
pub mod row;
pub mod store;

pub use client::BackendClient;
pub use error::BackendError;
pub use query::MentionQuery;
pub use row::{parse_count, PalfRowAdapter, RawRow, RowAdapter};
pub use store::MentionStore;
