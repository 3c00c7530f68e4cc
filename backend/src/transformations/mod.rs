//! Row-level transformations of utilization data.
//!
//! Every function here is pure: it borrows its input and returns a new
//! collection, so each refresh cycle rebuilds its rows from scratch.
//!
//! # Modules
//!
//! - [`normalize`]: Convert raw API records into canonical rows
//! - [`filtering`]: Narrow rows to an inclusive date range
//! - [`sorting`]: Order rows by a column with per-column comparison rules
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use usage_dashboard::api::{SortColumn, SortDirection, SortState};
//! use usage_dashboard::models::RawRecord;
//! use usage_dashboard::transformations::{filter_by_date_range, normalize_records, sort_rows};
//!
//! let raw = vec![
//!     RawRecord::new(json!({"usage_date": "2024-01-02", "utilization_pct": 50})),
//!     RawRecord::new(json!({"usage_date": "2024-01-01", "utilization": "80"})),
//! ];
//! let rows = normalize_records(&raw);
//! let rows = filter_by_date_range(&rows, None, None);
//! let sorted = sort_rows(&rows, SortState::new(SortColumn::UsageDate, SortDirection::Asc));
//! assert_eq!(sorted[0].usage_date, "2024-01-01");
//! ```

pub mod filtering;
pub mod normalize;
pub mod sorting;

pub use filtering::{count_unparsable, filter_by_date_range, DateRange};
pub use normalize::{normalize_record, normalize_records};
pub use sorting::{compare_rows, sort_chronologically, sort_rows};
