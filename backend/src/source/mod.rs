//! Utilization data sources.
//!
//! The dashboard never talks to the remote API directly; it goes through the
//! [`UtilizationSource`] trait so the backend can be swapped.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Dashboard session (services::session)        │
//! └───────────────────┬──────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────┐
//! │  UtilizationSource trait                      │
//! └──────────┬───────────────────────┬───────────┘
//!            │                       │
//!   ┌────────▼────────┐     ┌────────▼────────┐
//!   │   HttpSource    │     │   LocalSource   │
//!   │ (remote API)    │     │  (in-memory)    │
//!   └─────────────────┘     └─────────────────┘
//! ```

pub mod error;
pub mod factory;
pub mod http;
pub mod local;

pub use error::{ErrorContext, SourceError, SourceResult};
pub use factory::{SourceFactory, SourceType};
pub use http::HttpSource;
pub use local::LocalSource;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::RawRecord;

/// Server-side filters for a utilization fetch. `None` means no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtilizationQuery {
    pub system: Option<String>,
    pub department: Option<String>,
}

impl UtilizationQuery {
    pub fn new(system: Option<String>, department: Option<String>) -> Self {
        Self { system, department }
    }

    /// Query string pairs for the present filters only.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(system) = self.system.as_deref() {
            pairs.push(("system", system));
        }
        if let Some(department) = self.department.as_deref() {
            pairs.push(("department", department));
        }
        pairs
    }
}

/// Remote collaborator that provides filter options and utilization records.
#[async_trait]
pub trait UtilizationSource: Send + Sync {
    /// Names from the systems list, in API order.
    async fn systems(&self) -> SourceResult<Vec<String>>;

    /// Names from the departments list, in API order.
    async fn departments(&self) -> SourceResult<Vec<String>>;

    /// Raw records matching `query`. Order is not meaningful.
    async fn utilization(&self, query: &UtilizationQuery) -> SourceResult<Vec<RawRecord>>;
}

/// Require a JSON array and wrap its elements as raw records.
pub fn records_from_value(value: Value) -> SourceResult<Vec<RawRecord>> {
    match value {
        Value::Array(items) => Ok(items.into_iter().map(RawRecord::new).collect()),
        other => Err(SourceError::unexpected_shape(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Pull `key` out of every element of a JSON array of objects.
///
/// Elements without a usable name are skipped.
pub fn names_from_value(value: Value, key: &str) -> SourceResult<Vec<String>> {
    let records = records_from_value(value)?;
    Ok(records
        .iter()
        .filter_map(|r| r.field(key).and_then(Value::as_str))
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
