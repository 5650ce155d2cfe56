use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::db::unit_of_work::UnitOfWork;
use crate::errors::AppResult;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Handle to the SQLite file. Cheap to clone; every unit of work opens its
/// own connection from it.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection with foreign keys enforced.
    pub fn open(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    pub fn unit_of_work(&self) -> AppResult<UnitOfWork> {
        Ok(UnitOfWork::new(self.open()?))
    }
}

/// Applies the embedded schema. Safe to run on every start.
pub fn init_db(db: &Database) -> AppResult<()> {
    let conn = db.open()?;
    conn.execute_batch(SCHEMA_SQL)?;

    info!(path = %db.path().display(), "database initialized");
    Ok(())
}
