use serde_json::Value;

use crate::models::{RawRecord, Utilization, UtilizationRow};

const DATE_KEYS: &[&str] = &["usage_date"];
const TIME_KEYS: &[&str] = &["usage_time"];
const UTILIZATION_KEYS: &[&str] = &["utilization_pct", "utilization"];
const SYSTEM_KEYS: &[&str] = &["system_name", "system"];
const DEPARTMENT_KEYS: &[&str] = &["department_name", "department"];

/// Normalize every record. The output has the same length as the input;
/// missing fields become defaults rather than errors.
pub fn normalize_records(records: &[RawRecord]) -> Vec<UtilizationRow> {
    records.iter().map(normalize_record).collect()
}

/// Normalize a single record.
pub fn normalize_record(record: &RawRecord) -> UtilizationRow {
    UtilizationRow {
        usage_date: text_field(record, DATE_KEYS),
        usage_time: text_field(record, TIME_KEYS),
        utilization_pct: record
            .first_field(UTILIZATION_KEYS)
            .map(Utilization::from_value)
            .unwrap_or_default(),
        system_name: text_field(record, SYSTEM_KEYS),
        department_name: text_field(record, DEPARTMENT_KEYS),
    }
}

fn text_field(record: &RawRecord, keys: &[&str]) -> String {
    record
        .first_field(keys)
        .and_then(scalar_text)
        .unwrap_or_default()
}

/// Textual form of a scalar; containers have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
