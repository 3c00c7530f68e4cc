//! Persisted light/dark theme preference.
//!
//! The preference lives under the fixed key [`THEME_KEY`] of a small TOML
//! file. It is read once when the store is opened; later reads are served
//! from memory and every change is written straight back.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Key the preference is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Failed to access theme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse theme file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize theme file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown theme: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// File-backed theme preference.
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    current: RwLock<Theme>,
}

impl ThemeStore {
    /// Open the store, reading the persisted value once.
    ///
    /// A missing file, or a file without the key, yields the default theme.
    /// An unknown value or an unparsable file also falls back to the default
    /// with a warning; only I/O failures are errors.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref().to_path_buf();
        let table = read_table_or_empty(&path)?;
        let theme = match table.get(THEME_KEY).and_then(toml::Value::as_str) {
            Some(value) => value.parse().unwrap_or_else(|e: ThemeError| {
                warn!(path = %path.display(), error = %e, "Ignoring stored theme, using default");
                Theme::default()
            }),
            None => Theme::default(),
        };
        info!(path = %path.display(), theme = %theme, "Loaded theme preference");
        Ok(Self {
            path,
            current: RwLock::new(theme),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Theme {
        *self.current.read()
    }

    /// Persist `theme`, keeping any other keys already in the file.
    pub fn set(&self, theme: Theme) -> Result<(), ThemeError> {
        let mut current = self.current.write();
        let mut table = read_table_or_empty(&self.path)?;
        table.insert(
            THEME_KEY.to_string(),
            toml::Value::String(theme.as_str().to_string()),
        );
        let content = toml::to_string(&table)?;
        fs::write(&self.path, content).map_err(|source| ThemeError::Io {
            path: self.path.clone(),
            source,
        })?;
        *current = theme;
        debug!(theme = %theme, "Theme preference saved");
        Ok(())
    }
}

/// Like [`read_table`], but an unparsable file is treated as empty so the
/// next write replaces it.
fn read_table_or_empty(path: &Path) -> Result<toml::Table, ThemeError> {
    match read_table(path) {
        Err(ThemeError::Parse(e)) => {
            warn!(path = %path.display(), error = %e, "Theme file is not valid TOML, ignoring it");
            Ok(toml::Table::new())
        }
        other => other,
    }
}

fn read_table(path: &Path) -> Result<toml::Table, ThemeError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(toml::Table::new()),
        Err(source) => Err(ThemeError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
