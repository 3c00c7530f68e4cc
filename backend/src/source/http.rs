//! Remote API source backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::{SourceError, SourceResult};
use super::{names_from_value, records_from_value, UtilizationQuery, UtilizationSource};
use crate::config::ApiSettings;
use crate::models::RawRecord;

/// Utilization source that calls the remote HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    systems_path: String,
    departments_path: String,
    utilization_path: String,
}

impl HttpSource {
    /// Build a source from API settings.
    pub fn new(settings: &ApiSettings) -> SourceResult<Self> {
        if settings.base_url.trim().is_empty() {
            return Err(SourceError::configuration("api.base_url must not be empty"));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SourceError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            systems_path: settings.systems_path.clone(),
            departments_path: settings.departments_path.clone(),
            utilization_path: settings.utilization_path.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> SourceResult<Value> {
        let url = self.url(path);
        debug!(url = %url, ?query, "GET");

        let details = query_details(query);
        let annotate = |err: SourceError| {
            let err = err.with_endpoint(path);
            match &details {
                Some(d) => err.with_details(d.clone()),
                None => err,
            }
        };

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| annotate(SourceError::connection(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<empty response>".to_string());
            return Err(annotate(SourceError::status(
                status.as_u16(),
                body.trim().to_string(),
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| annotate(SourceError::decode(e.to_string())))
    }
}

/// `key=value&...` form of the query parameters, if any were sent.
fn query_details(query: &[(&str, &str)]) -> Option<String> {
    if query.is_empty() {
        return None;
    }
    Some(
        query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&"),
    )
}

#[async_trait]
impl UtilizationSource for HttpSource {
    async fn systems(&self) -> SourceResult<Vec<String>> {
        let value = self
            .get_json(&self.systems_path, &[])
            .await
            .map_err(|e| e.with_operation("fetch_systems"))?;
        names_from_value(value, "system_name").map_err(|e| e.with_operation("fetch_systems"))
    }

    async fn departments(&self) -> SourceResult<Vec<String>> {
        let value = self
            .get_json(&self.departments_path, &[])
            .await
            .map_err(|e| e.with_operation("fetch_departments"))?;
        names_from_value(value, "department_name")
            .map_err(|e| e.with_operation("fetch_departments"))
    }

    async fn utilization(&self, query: &UtilizationQuery) -> SourceResult<Vec<RawRecord>> {
        let value = self
            .get_json(&self.utilization_path, &query.to_pairs())
            .await
            .map_err(|e| e.with_operation("fetch_utilization"))?;
        let records = records_from_value(value).map_err(|e| {
            e.with_operation("fetch_utilization")
                .with_endpoint(self.utilization_path.clone())
        })?;
        debug!(count = records.len(), "Fetched utilization records");
        Ok(records)
    }
}
