//! Chronological ordering keys for utilization rows.
//!
//! Rows carry their date and time of day as separate strings. The combined
//! value is what the date-range filter, the date/time sort and the chart
//! ordering all compare against.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 3] = ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Combined date + time of a row.
///
/// `Unparsable` orders as the Unix epoch, i.e. before every real timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chronological {
    Valid(NaiveDateTime),
    Unparsable,
}

impl Chronological {
    /// Parse a date string and an optional (possibly empty) time of day.
    pub fn parse(date: &str, time: &str) -> Self {
        let date = date.trim();
        let time = time.trim();

        if let Some(datetime) = parse_datetime_field(date) {
            // An explicit time column wins over the time embedded in the date field.
            if time.is_empty() {
                return Self::Valid(datetime);
            }
            return match parse_time(time) {
                Some(t) => Self::Valid(datetime.date().and_time(t)),
                None => Self::Unparsable,
            };
        }

        let Ok(day) = NaiveDate::parse_from_str(date, DATE_FORMAT) else {
            return Self::Unparsable;
        };
        if time.is_empty() {
            return Self::Valid(day.and_time(NaiveTime::MIN));
        }
        match parse_time(time) {
            Some(t) => Self::Valid(day.and_time(t)),
            None => Self::Unparsable,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Ordering key; unparsable values collapse to the epoch.
    pub fn sort_key(&self) -> NaiveDateTime {
        match self {
            Self::Valid(dt) => *dt,
            Self::Unparsable => DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
        }
    }
}

fn parse_time(time: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
}

fn parse_datetime_field(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parse a `YYYY-MM-DD` filter bound. Blank input means "no bound".
pub fn parse_date_bound(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map(Some)
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
