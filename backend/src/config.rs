//! Dashboard configuration file support.
//!
//! Settings are read from a TOML file and can be overridden through
//! environment variables. Every section is optional.
//!
//! ```toml
//! [source]
//! type = "http"            # or "local"
//!
//! [api]
//! base_url = "http://localhost:8000/api"
//! systems_path = "/systems"
//! departments_path = "/departments"
//! utilization_path = "/utilization/filter"
//! # timeout_secs = 30
//!
//! [local]
//! records_path = "fixtures/utilization.json"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [theme]
//! path = "theme.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceSettings,
    pub api: ApiSettings,
    pub local: LocalSettings,
    pub server: ServerSettings,
    pub theme: ThemeSettings,
}

/// Which source backend to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    #[serde(rename = "type")]
    pub source_type: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: "http".to_string(),
        }
    }
}

/// Remote API endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub systems_path: String,
    pub departments_path: String,
    pub utilization_path: String,
    /// No timeout is applied unless set.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            systems_path: "/systems".to_string(),
            departments_path: "/departments".to_string(),
            utilization_path: "/utilization/filter".to_string(),
            timeout_secs: None,
        }
    }
}

/// In-memory source fixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSettings {
    pub records_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Where the theme preference is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub path: PathBuf,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("theme.toml"),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Search the standard locations for `dashboard.toml`.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns the default configuration when no file exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                tracing::info!(path = %path.display(), "Loading dashboard configuration");
                return Self::from_file(&path);
            }
        }

        tracing::info!("No dashboard.toml found, using defaults");
        Ok(Self::default())
    }

    /// Apply overrides from the process environment.
    ///
    /// Recognized variables: `SOURCE_TYPE`, `API_BASE_URL`, `HOST`, `PORT`,
    /// `THEME_PATH`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SOURCE_TYPE") {
            self.source.source_type = v;
        }
        if let Some(v) = lookup("API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().map_err(|e| ConfigError::Invalid {
                key: "PORT".to_string(),
                message: format!("{}", e),
            })?;
        }
        if let Some(v) = lookup("THEME_PATH") {
            self.theme.path = PathBuf::from(v);
        }
        Ok(self)
    }
}
