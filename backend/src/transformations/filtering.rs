use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::warn;

use crate::models::UtilizationRow;

/// Inclusive date window `[from 00:00:00, to 23:59:59]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    fn lower(&self) -> Option<NaiveDateTime> {
        self.from.map(|d| d.and_time(NaiveTime::MIN))
    }

    fn upper(&self) -> Option<NaiveDateTime> {
        self.to.and_then(|d| d.and_hms_opt(23, 59, 59))
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.lower().map_or(true, |lo| instant >= lo) && self.upper().map_or(true, |hi| instant <= hi)
    }
}

/// Keep date-bearing rows whose combined timestamp falls in the range.
///
/// Rows with an unparsable timestamp are placed at the epoch: they survive
/// unless a lower bound excludes them.
pub fn filter_by_date_range(
    rows: &[UtilizationRow],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<UtilizationRow> {
    let range = DateRange::new(from, to);
    rows.iter()
        .filter(|row| row.has_date())
        .filter(|row| {
            let stamp = row.chronological();
            if !stamp.is_valid() {
                warn!(
                    usage_date = %row.usage_date,
                    usage_time = %row.usage_time,
                    "Unparsable usage timestamp, treating as epoch"
                );
            }
            range.contains(stamp.sort_key())
        })
        .cloned()
        .collect()
}

/// Number of date-bearing rows whose timestamp could not be parsed.
pub fn count_unparsable(rows: &[UtilizationRow]) -> usize {
    rows.iter()
        .filter(|row| row.has_date() && !row.chronological().is_valid())
        .count()
}
