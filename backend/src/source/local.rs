//! In-memory utilization source for development and testing.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::error::{SourceError, SourceResult};
use super::{records_from_value, UtilizationQuery, UtilizationSource};
use crate::models::RawRecord;
use crate::transformations::normalize_record;

/// Serves a fixed record set, applying system/department filters the way the
/// remote API does.
#[derive(Debug, Default)]
pub struct LocalSource {
    records: RwLock<Vec<RawRecord>>,
}

impl LocalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Load records from a JSON file containing an array.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SourceError::configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|e| SourceError::decode(e.to_string()).with_endpoint(path.display().to_string()))?;
        Ok(Self::with_records(records_from_value(value)?))
    }

    /// Replace the served records.
    pub fn set_records(&self, records: Vec<RawRecord>) {
        *self.records.write() = records;
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn distinct_names<F>(&self, pick: F) -> Vec<String>
    where
        F: Fn(&RawRecord) -> String,
    {
        let mut names: Vec<String> = Vec::new();
        for record in self.records.read().iter() {
            let name = pick(record);
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names.sort();
        names
    }
}

#[async_trait]
impl UtilizationSource for LocalSource {
    async fn systems(&self) -> SourceResult<Vec<String>> {
        Ok(self.distinct_names(|r| normalize_record(r).system_name))
    }

    async fn departments(&self) -> SourceResult<Vec<String>> {
        Ok(self.distinct_names(|r| normalize_record(r).department_name))
    }

    async fn utilization(&self, query: &UtilizationQuery) -> SourceResult<Vec<RawRecord>> {
        let records = self.records.read();
        Ok(records
            .iter()
            .filter(|r| {
                let row = normalize_record(r);
                query.system.as_ref().map_or(true, |s| &row.system_name == s)
                    && query
                        .department
                        .as_ref()
                        .map_or(true, |d| &row.department_name == d)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn sample() -> LocalSource {
        LocalSource::with_records(vec![
            RawRecord::new(json!({"usage_date": "2024-01-01", "system_name": "beta", "department_name": "chem"})),
            RawRecord::new(json!({"usage_date": "2024-01-02", "system": "alpha", "department": "physics"})),
            RawRecord::new(json!({"usage_date": "2024-01-03", "system_name": "beta", "department_name": "physics"})),
        ])
    }

    #[tokio::test]
    async fn test_filter_options_are_distinct_and_sorted() {
        let source = sample();
        assert_eq!(source.systems().await.unwrap(), vec!["alpha", "beta"]);
        assert_eq!(source.departments().await.unwrap(), vec!["chem", "physics"]);
    }

    #[tokio::test]
    async fn test_utilization_filters() {
        let source = sample();
        let all = source.utilization(&UtilizationQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let beta = source
            .utilization(&UtilizationQuery::new(Some("beta".into()), None))
            .await
            .unwrap();
        assert_eq!(beta.len(), 2);

        let both = source
            .utilization(&UtilizationQuery::new(Some("beta".into()), Some("physics".into())))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
    }

    #[tokio::test]
    async fn test_set_records() {
        let source = LocalSource::new();
        assert!(source.is_empty());
        source.set_records(vec![RawRecord::new(json!({}))]);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"usage_date": "2024-01-01"}}, {{"usage_date": "2024-01-02"}}]"#).unwrap();
        let source = LocalSource::from_json_file(file.path()).unwrap();
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_from_json_file_rejects_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows": []}}"#).unwrap();
        assert!(matches!(
            LocalSource::from_json_file(file.path()),
            Err(SourceError::UnexpectedShape { .. })
        ));
    }
}
