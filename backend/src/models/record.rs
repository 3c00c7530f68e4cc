//! Raw API records and the canonical utilization row.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::time::Chronological;

/// A record exactly as the remote API returned it.
///
/// The payload is untrusted: any field may be missing, `null`, or of an
/// unexpected type. Non-object payloads behave as if every field were absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Value);

impl RawRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a field, treating `null` the same as absence.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// First present field among `keys`.
    pub fn first_field(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|k| self.field(k))
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Utilization percentage after explicit coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Utilization {
    /// A finite numeric value.
    Valid(f64),
    /// A present but non-numeric value, kept as display text.
    Invalid(String),
}

impl Utilization {
    /// Coerce an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => Self::Valid(v),
                _ => Self::Invalid(n.to_string()),
            },
            Value::String(s) => Self::parse(s),
            Value::Null => Self::Invalid(String::new()),
            other => Self::Invalid(other.to_string()),
        }
    }

    /// Parse text; blank or non-finite input is invalid.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Valid(v),
            _ => Self::Invalid(text.to_string()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Valid(v) => Some(*v),
            Self::Invalid(_) => None,
        }
    }

    /// Numeric sort key; invalid values order before every valid number.
    pub fn sort_key(&self) -> f64 {
        self.value().unwrap_or(f64::NEG_INFINITY)
    }

    pub fn display(&self) -> String {
        match self {
            Self::Valid(v) => v.to_string(),
            Self::Invalid(raw) => raw.clone(),
        }
    }
}

impl Default for Utilization {
    fn default() -> Self {
        Self::Valid(0.0)
    }
}

/// Canonical row produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UtilizationRow {
    pub usage_date: String,
    pub usage_time: String,
    pub utilization_pct: Utilization,
    pub system_name: String,
    pub department_name: String,
}

impl UtilizationRow {
    /// Rows without a date cannot be placed in time and are dropped downstream.
    pub fn has_date(&self) -> bool {
        !self.usage_date.trim().is_empty()
    }

    pub fn chronological(&self) -> Chronological {
        Chronological::parse(&self.usage_date, &self.usage_time)
    }

    /// `"date time"`, without the trailing space when the time is empty.
    pub fn timestamp_label(&self) -> String {
        format!("{} {}", self.usage_date, self.usage_time)
            .trim()
            .to_string()
    }
}
