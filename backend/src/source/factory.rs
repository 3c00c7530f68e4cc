//! Source factory for dependency injection.
//!
//! Builds the configured [`UtilizationSource`] behind an `Arc<dyn _>` so the
//! session and HTTP layer never name a concrete backend.

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::error::{SourceError, SourceResult};
use super::{HttpSource, LocalSource, UtilizationSource};
use crate::config::DashboardConfig;

/// Source backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Remote utilization API
    Http,
    /// In-memory records, optionally loaded from a JSON fixture
    Local,
}

impl FromStr for SourceType {
    type Err = String;

    /// Parse source type from string ("http", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "remote" => Ok(Self::Http),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

/// Factory for creating source instances.
pub struct SourceFactory;

impl SourceFactory {
    /// Create the source described by `config`.
    pub fn create(config: &DashboardConfig) -> SourceResult<Arc<dyn UtilizationSource>> {
        let source_type = SourceType::from_str(&config.source.source_type)
            .map_err(SourceError::configuration)?;

        match source_type {
            SourceType::Http => {
                info!(base_url = %config.api.base_url, "Using HTTP utilization source");
                Ok(Arc::new(HttpSource::new(&config.api)?))
            }
            SourceType::Local => {
                let source = match &config.local.records_path {
                    Some(path) => LocalSource::from_json_file(path)?,
                    None => LocalSource::new(),
                };
                info!(records = source.len(), "Using local utilization source");
                Ok(Arc::new(source))
            }
        }
    }
}
