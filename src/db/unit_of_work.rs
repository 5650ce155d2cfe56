// src/db/unit_of_work.rs

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::db::entity::{column_list, header_values, sql_value, Entity};
use crate::db::repository::Repository;
use crate::domain::catalog::{Make, Model, VehicleType};
use crate::domain::listing::{Advertisement, Favorite, SavedSearch};
use crate::domain::user::User;
use crate::domain::vehicle::{Vehicle, VehicleImage};
use crate::errors::{AppError, AppResult};

/// One write waiting for `save_changes`. Values are captured when staged,
/// so later edits to the caller's copy are not picked up.
#[derive(Debug, Clone)]
pub(crate) enum StagedWrite {
    Insert {
        table: &'static str,
        columns: String,
        values: Vec<Value>,
    },
    Update {
        table: &'static str,
        columns: &'static [&'static str],
        id: Uuid,
        values: Vec<Value>,
    },
    SoftDelete {
        table: &'static str,
        id: Uuid,
    },
    Restore {
        table: &'static str,
        id: Uuid,
    },
    Delete {
        table: &'static str,
        id: Uuid,
    },
}

impl StagedWrite {
    pub(crate) fn insert<T: Entity>(entity: &T) -> rusqlite::Result<Self> {
        let mut values = header_values(entity.header())?;
        values.extend(entity.values()?);
        Ok(StagedWrite::Insert {
            table: T::TABLE,
            columns: column_list::<T>(),
            values,
        })
    }

    pub(crate) fn update<T: Entity>(entity: &T) -> rusqlite::Result<Self> {
        Ok(StagedWrite::Update {
            table: T::TABLE,
            columns: T::COLUMNS,
            id: entity.id(),
            values: entity.values()?,
        })
    }

    fn apply(&self, conn: &Connection, now: &DateTime<Utc>) -> rusqlite::Result<usize> {
        match self {
            StagedWrite::Insert {
                table,
                columns,
                values,
            } => {
                let marks = vec!["?"; values.len()].join(", ");
                let sql = format!("INSERT INTO {table} ({columns}) VALUES ({marks})");
                conn.execute(&sql, params_from_iter(values.iter()))
            }
            StagedWrite::Update {
                table,
                columns,
                id,
                values,
            } => {
                let sets: Vec<String> = columns.iter().map(|c| format!("{c} = ?")).collect();
                let sql = format!(
                    "UPDATE {table} SET {}, updated_at = ? WHERE id = ? AND is_deleted = 0",
                    sets.join(", ")
                );
                let mut bound = values.clone();
                bound.push(sql_value(now)?);
                bound.push(sql_value(id)?);
                conn.execute(&sql, params_from_iter(bound.iter()))
            }
            StagedWrite::SoftDelete { table, id } => conn.execute(
                &format!(
                    "UPDATE {table} SET is_deleted = 1, deleted_at = ?1, updated_at = ?1 \
                     WHERE id = ?2 AND is_deleted = 0"
                ),
                params![now, id],
            ),
            StagedWrite::Restore { table, id } => conn.execute(
                &format!(
                    "UPDATE {table} SET is_deleted = 0, deleted_at = NULL, updated_at = ?1 \
                     WHERE id = ?2 AND is_deleted = 1"
                ),
                params![now, id],
            ),
            StagedWrite::Delete { table, id } => {
                conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), params![id])
            }
        }
    }
}

/// A connection plus the writes staged against it.
///
/// Opened per operation via `Database::unit_of_work`. Repositories borrow
/// it; nothing reaches the store until `save_changes`. An explicit
/// transaction can span several saves and is rolled back if the unit of
/// work is dropped while it is still open.
pub struct UnitOfWork {
    conn: Connection,
    staged: RefCell<Vec<StagedWrite>>,
    transaction_open: Cell<bool>,
}

impl UnitOfWork {
    pub(crate) fn new(conn: Connection) -> Self {
        Self {
            conn,
            staged: RefCell::new(Vec::new()),
            transaction_open: Cell::new(false),
        }
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn stage(&self, write: StagedWrite) {
        self.staged.borrow_mut().push(write);
    }

    pub fn repository<T: Entity>(&self) -> Repository<'_, T> {
        Repository::new(self)
    }

    pub fn makes(&self) -> Repository<'_, Make> {
        self.repository()
    }

    pub fn models(&self) -> Repository<'_, Model> {
        self.repository()
    }

    pub fn vehicle_types(&self) -> Repository<'_, VehicleType> {
        self.repository()
    }

    pub fn vehicles(&self) -> Repository<'_, Vehicle> {
        self.repository()
    }

    pub fn vehicle_images(&self) -> Repository<'_, VehicleImage> {
        self.repository()
    }

    pub fn advertisements(&self) -> Repository<'_, Advertisement> {
        self.repository()
    }

    pub fn users(&self) -> Repository<'_, User> {
        self.repository()
    }

    pub fn favorites(&self) -> Repository<'_, Favorite> {
        self.repository()
    }

    pub fn saved_searches(&self) -> Repository<'_, SavedSearch> {
        self.repository()
    }

    pub fn pending_changes(&self) -> usize {
        self.staged.borrow().len()
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction_open.get()
    }

    /// Flushes every staged write in staging order and returns the number of
    /// rows affected. Either all of them land or none do; on failure the
    /// staged list is discarded.
    pub fn save_changes(&self) -> AppResult<usize> {
        let staged = std::mem::take(&mut *self.staged.borrow_mut());
        if staged.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        self.conn.execute_batch("SAVEPOINT save_changes")?;

        let mut written = 0;
        for write in &staged {
            match write.apply(&self.conn, &now) {
                Ok(n) => written += n,
                Err(e) => {
                    if let Err(rb) = self
                        .conn
                        .execute_batch("ROLLBACK TO save_changes; RELEASE save_changes")
                    {
                        warn!(error = %rb, "failed to roll back savepoint");
                    }
                    return Err(e.into());
                }
            }
        }

        self.conn.execute_batch("RELEASE save_changes")?;
        debug!(writes = staged.len(), rows = written, "flushed staged changes");
        Ok(written)
    }

    pub fn begin_transaction(&self) -> AppResult<()> {
        if self.transaction_open.get() {
            return Err(AppError::Transaction(
                "a transaction is already open".to_string(),
            ));
        }
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        self.transaction_open.set(true);
        Ok(())
    }

    /// Runs `f` inside a transaction: committed when `f` succeeds, rolled
    /// back (staged writes included) when it fails.
    pub fn transaction<T>(&self, f: impl FnOnce(&Self) -> AppResult<T>) -> AppResult<T> {
        self.begin_transaction()?;
        match f(self).and_then(|value| self.commit_transaction().map(|_| value)) {
            Ok(value) => Ok(value),
            Err(e) => {
                if let Err(rb) = self.rollback_transaction() {
                    warn!(error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Commits the open transaction. Staged but unsaved writes are not part
    /// of it. No-op without an open transaction.
    pub fn commit_transaction(&self) -> AppResult<()> {
        if !self.transaction_open.get() {
            return Ok(());
        }
        if self.pending_changes() > 0 {
            warn!(
                pending = self.pending_changes(),
                "committing with unsaved staged changes"
            );
        }
        self.conn.execute_batch("COMMIT")?;
        self.transaction_open.set(false);
        Ok(())
    }

    /// Rolls back the open transaction and drops any staged writes.
    /// No-op without an open transaction.
    pub fn rollback_transaction(&self) -> AppResult<()> {
        if !self.transaction_open.get() {
            return Ok(());
        }
        self.staged.borrow_mut().clear();
        // The flag stays set on failure so that drop retries the rollback.
        self.conn.execute_batch("ROLLBACK")?;
        self.transaction_open.set(false);
        Ok(())
    }
}

impl Drop for UnitOfWork {
    fn drop(&mut self) {
        if self.transaction_open.get() {
            warn!("unit of work dropped with an open transaction; rolling back");
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                warn!(error = %e, "rollback on drop failed");
            }
        }
    }
}
