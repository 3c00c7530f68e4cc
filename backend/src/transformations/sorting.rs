use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::api::{SortColumn, SortDirection, SortState};
use crate::models::UtilizationRow;

/// Per-row key for one column, computed once per sort.
#[derive(Debug)]
enum SortKey {
    Number(f64),
    Instant(NaiveDateTime),
    Text(String),
}

impl SortKey {
    fn of(row: &UtilizationRow, column: SortColumn) -> Self {
        match column {
            SortColumn::UtilizationPct => Self::Number(row.utilization_pct.sort_key()),
            SortColumn::UsageDate | SortColumn::UsageTime => {
                Self::Instant(row.chronological().sort_key())
            }
            SortColumn::SystemName => Self::Text(row.system_name.to_lowercase()),
            SortColumn::DepartmentName => Self::Text(row.department_name.to_lowercase()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Keys are finite or -inf, and -0.0 must tie with 0.0.
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Instant(a), Self::Instant(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Compare two rows under `column`, ascending.
///
/// - `utilization_pct`: numeric, invalid values below every number
/// - `usage_date` / `usage_time`: combined timestamp, unparsable at the epoch
/// - `system_name` / `department_name`: case-insensitive text
pub fn compare_rows(a: &UtilizationRow, b: &UtilizationRow, column: SortColumn) -> Ordering {
    SortKey::of(a, column).compare(&SortKey::of(b, column))
}

/// Return a new, stably sorted copy of `rows`.
///
/// Keys are computed once per row. Descending order reverses the comparator
/// rather than the output, so equal keys keep their input order in both
/// directions.
pub fn sort_rows(rows: &[UtilizationRow], sort: SortState) -> Vec<UtilizationRow> {
    let mut keyed: Vec<(SortKey, &UtilizationRow)> = rows
        .iter()
        .map(|row| (SortKey::of(row, sort.column), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}

/// Chronological ascending copy, independent of the table sort.
pub fn sort_chronologically(rows: &[UtilizationRow]) -> Vec<UtilizationRow> {
    sort_rows(rows, SortState::new(SortColumn::UsageDate, SortDirection::Asc))
}

#[cfg(test)]
#[path = "sorting_tests.rs"]
mod sorting_tests;
