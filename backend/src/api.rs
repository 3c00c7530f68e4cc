//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types shared by the services and the HTTP
//! API. All types derive Serialize/Deserialize for JSON serialization.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Sorting
// =============================================================================

/// Table column that can drive the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    UsageDate,
    UsageTime,
    SystemName,
    DepartmentName,
    UtilizationPct,
}

impl SortColumn {
    /// Columns in table display order.
    pub const ALL: [SortColumn; 5] = [
        SortColumn::UsageDate,
        SortColumn::UsageTime,
        SortColumn::SystemName,
        SortColumn::DepartmentName,
        SortColumn::UtilizationPct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsageDate => "usage_date",
            Self::UsageTime => "usage_time",
            Self::SystemName => "system_name",
            Self::DepartmentName => "department_name",
            Self::UtilizationPct => "utilization_pct",
        }
    }

    /// Header label shown above the column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UsageDate => "Date",
            Self::UsageTime => "Time",
            Self::SystemName => "System",
            Self::DepartmentName => "Department",
            Self::UtilizationPct => "Utilization %",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown sort column: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The single active sort of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::UsageDate,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::new(column, SortDirection::Asc)
        }
    }

    /// Arrow to show on `column`'s header, if any.
    pub fn indicator(&self, column: SortColumn) -> Option<SortDirection> {
        (self.column == column).then_some(self.direction)
    }
}

// =============================================================================
// Filters
// =============================================================================

/// Current filter selection. `None` means "no filter on that dimension".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl FilterSelection {
    /// Normalize blank selections to `None`.
    pub fn cleaned(self) -> Self {
        fn non_blank(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        Self {
            system: non_blank(self.system),
            department: non_blank(self.department),
            from: self.from,
            to: self.to,
        }
    }
}

/// One entry of a filter drop-down. The empty value stands for "All".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn all() -> Self {
        Self {
            value: String::new(),
            label: "All".to_string(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            label: name,
        }
    }
}

/// Drop-down contents for the system and department filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub systems: Vec<FilterOption>,
    pub departments: Vec<FilterOption>,
}

impl FilterOptions {
    pub fn from_names(systems: Vec<String>, departments: Vec<String>) -> Self {
        let build = |names: Vec<String>| {
            std::iter::once(FilterOption::all())
                .chain(names.into_iter().map(FilterOption::named))
                .collect()
        };
        Self {
            systems: build(systems),
            departments: build(departments),
        }
    }

    /// Fallback when the option lists could not be loaded.
    pub fn all_only() -> Self {
        Self::from_names(Vec::new(), Vec::new())
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self::all_only()
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Aggregate statistics over the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub avg: f64,
    pub max: f64,
    pub min: f64,
    pub systems_count: usize,
    pub depts_count: usize,
}

/// Display strings for the six summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub total: String,
    pub avg: String,
    pub max: String,
    pub min: String,
    pub systems_count: String,
    pub depts_count: String,
}

// =============================================================================
// Chart and table
// =============================================================================

/// Tooltip payload for a single chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTooltip {
    pub usage_pct: String,
    pub system_name: String,
    pub department_name: String,
}

/// Time series handed to the charting library.
///
/// `labels`, `values` and `tooltips` are parallel; `values` holds `None` for
/// rows whose utilization is not numeric.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub tooltips: Vec<ChartTooltip>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One visual table row, all fields already formatted as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub usage_date: String,
    pub usage_time: String,
    pub system_name: String,
    pub department_name: String,
    pub utilization_pct: String,
}

/// Table body: either data rows or a single failure placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableView {
    Rows { rows: Vec<TableRow> },
    Placeholder { message: String },
}

impl Default for TableView {
    fn default() -> Self {
        Self::Rows { rows: Vec::new() }
    }
}

/// Column header with its sort arrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub column: SortColumn,
    pub label: String,
    pub indicator: Option<SortDirection>,
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Everything a front-end needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub phase: DashboardPhase,
    pub filters: FilterSelection,
    pub filter_options: FilterOptions,
    pub sort: SortState,
    pub headers: Vec<ColumnHeader>,
    /// `None` while blanked after a failed fetch.
    pub summary: Option<Summary>,
    pub cards: SummaryCards,
    pub chart: ChartSeries,
    pub table: TableView,
    /// Rows whose date/time could not be parsed and were placed at the epoch.
    pub unparsable_timestamps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
