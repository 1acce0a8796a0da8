use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{error, info};
use rusqlite::Connection;

/// Handle to the on-disk SQLite database. Only the path is kept: every
/// operation opens its own connection and drops it when done.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Ensure the database file and its parent directory exist and create the
    /// `items` table when it is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let started_at = Instant::now();
        let store = Self { path: path.into() };

        if let Some(parent) = store.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("failed to create data directory")?;
            }
        }

        match store.ensure_schema() {
            Ok(()) => {
                info!(
                    "event=db_open module=db status=ok path={} duration_ms={}",
                    store.path.display(),
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error path={} error={:#}",
                    store.path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a short-lived connection for a single operation.
    pub(crate) fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).context("failed to open SQLite database")
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                title TEXT NOT NULL,
                author TEXT,
                pages INTEGER,
                issue TEXT,
                month TEXT,
                illustrator TEXT
            )",
            [],
        )
        .context("failed to create items table")?;
        Ok(())
    }
}
