//! Data Transfer Objects for the HTTP API.
//!
//! View types are re-exported from [`crate::api`]; the request bodies below
//! accept loosely-typed input and convert it with explicit validation.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    ChartSeries, ChartTooltip, ColumnHeader, DashboardPhase, DashboardView, FilterOption,
    FilterOptions, FilterSelection, SortColumn, SortDirection, SortState, Summary, SummaryCards,
    TableRow, TableView,
};
use crate::models::parse_date_bound;
use crate::theme::Theme;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Request body for applying filters.
///
/// Every field is optional; empty strings mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyFiltersRequest {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Inclusive lower date bound, `YYYY-MM-DD`
    #[serde(default)]
    pub from: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`
    #[serde(default)]
    pub to: Option<String>,
}

impl ApplyFiltersRequest {
    /// Validate the request into a filter selection.
    pub fn into_selection(self) -> Result<FilterSelection, String> {
        let bound = |name: &str, value: Option<String>| match value {
            Some(v) => parse_date_bound(&v)
                .map_err(|e| format!("Invalid '{}' date '{}': {}", name, v, e)),
            None => Ok(None),
        };
        Ok(FilterSelection {
            system: self.system,
            department: self.department,
            from: bound("from", self.from)?,
            to: bound("to", self.to)?,
        }
        .cleaned())
    }
}

/// Request body for a header click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRequest {
    pub column: SortColumn,
}

/// Theme preference, request and response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_into_selection() {
        let request = ApplyFiltersRequest {
            system: Some("".into()),
            department: Some("physics".into()),
            from: Some("2024-01-01".into()),
            to: Some("".into()),
        };
        let selection = request.into_selection().unwrap();
        assert_eq!(selection.system, None);
        assert_eq!(selection.department.as_deref(), Some("physics"));
        assert_eq!(selection.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(selection.to, None);
    }

    #[test]
    fn test_into_selection_rejects_bad_date() {
        let request = ApplyFiltersRequest {
            to: Some("31/01/2024".into()),
            ..Default::default()
        };
        let err = request.into_selection().unwrap_err();
        assert!(err.contains("'to'"));
    }

    #[test]
    fn test_sort_request_parses_column() {
        let req: SortRequest = serde_json::from_str(r#"{"column": "utilization_pct"}"#).unwrap();
        assert_eq!(req.column, SortColumn::UtilizationPct);
        assert!(serde_json::from_str::<SortRequest>(r#"{"column": "colour"}"#).is_err());
    }
}
