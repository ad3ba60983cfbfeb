//! User settings persisted as a small JSON document.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DATABASE_PATH: &str = "budget.db";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File path to the SQLite database.
    pub db_path: PathBuf,
    /// Printed in front of every amount.
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl Config {
    /// Read the config at `path`.
    ///
    /// A missing file gives the defaults. A file that is not valid JSON is
    /// logged and also gives the defaults, and keys missing from the document
    /// take their default values.
    ///
    /// # Errors
    /// Returns [Error::Io] if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(error) => return Err(Error::io(path, error)),
        };

        match serde_json::from_str(&text) {
            Ok(config) => Ok(config),
            Err(error) => {
                tracing::warn!(
                    "invalid JSON in {}, using defaults: {error}",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Write the config to `path`.
    ///
    /// The document is written to a temporary file next to `path` which then
    /// replaces `path`, so readers never see a half written file.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        let json = serde_json::to_string_pretty(self)?;
        file.write_all(json.as_bytes())
            .map_err(|e| Error::io(file.path(), e))?;
        file.persist(path).map_err(|e| Error::io(path, e.error))?;

        tracing::info!("saved config to {}", path.display());
        Ok(())
    }

    /// Return a copy with any given settings replaced.
    pub fn with_changes(&self, db_path: Option<PathBuf>, currency_symbol: Option<String>) -> Self {
        Self {
            db_path: db_path.unwrap_or_else(|| self.db_path.clone()),
            currency_symbol: currency_symbol.unwrap_or_else(|| self.currency_symbol.clone()),
        }
    }
}
