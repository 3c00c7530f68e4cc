use std::collections::HashSet;

use crate::api::Summary;
use crate::models::UtilizationRow;

/// Round to two decimals, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute summary statistics over a row set.
///
/// `avg` divides the sum of numeric utilizations by the full row count,
/// rows with non-numeric utilization included. `max`/`min` are 0 when no
/// row carries a numeric value.
pub fn compute_summary(rows: &[UtilizationRow]) -> Summary {
    let total = rows.len();

    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.utilization_pct.value())
        .collect();

    let avg = if total > 0 {
        values.iter().sum::<f64>() / total as f64
    } else {
        0.0
    };
    let (max, min) = if values.is_empty() {
        (0.0, 0.0)
    } else {
        (
            values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            values.iter().copied().fold(f64::INFINITY, f64::min),
        )
    };

    let systems_count = rows
        .iter()
        .map(|r| r.system_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let depts_count = rows
        .iter()
        .map(|r| r.department_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    Summary {
        total,
        avg: round2(avg),
        max: round2(max),
        min: round2(min),
        systems_count,
        depts_count,
    }
}
