use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::Error;

const CREATE_TRANSACTIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS transactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL CHECK (type IN ('income', 'expense'))
    )";

/// Handle to the SQLite database file.
///
/// No connection is held between operations. Each call to [Database::connect]
/// opens a fresh connection that is closed when it is dropped at the end of
/// the operation, on both the success and error paths.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the database at `path` and create the schema if it is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let database = Self::new(path);
        database.initialize()?;
        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection, Error> {
        tracing::debug!("opening database {}", self.path.display());
        Ok(Connection::open(&self.path)?)
    }

    /// Create the transactions table if it doesn't exist.
    pub fn initialize(&self) -> Result<(), Error> {
        let conn = self.connect()?;
        conn.execute(CREATE_TRANSACTIONS_TABLE, [])?;
        Ok(())
    }
}

#[cfg(test)]
pub fn establish_test_database() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database =
        Database::open(dir.path().join("test.db")).expect("Failed to initialize test database");
    (dir, database)
}
