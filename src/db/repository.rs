// src/db/repository.rs

use std::marker::PhantomData;

use rusqlite::{params_from_iter, Connection};
use uuid::Uuid;

use crate::db::entity::{column_list, Entity, SoftDeletable, Visibility};
use crate::db::filter::Filter;
use crate::db::unit_of_work::{StagedWrite, UnitOfWork};
use crate::errors::AppResult;

/// Upper bound on ids bound into one `IN (...)` list.
pub const ID_CHUNK: usize = 500;

/// Read/write surface for one entity type inside a unit of work.
///
/// Reads go straight to the store and only see flushed rows. Writes are
/// staged on the owning unit of work and hit the store at `save_changes`.
pub struct Repository<'u, T> {
    uow: &'u UnitOfWork,
    _entity: PhantomData<T>,
}

impl<'u, T: Entity> Repository<'u, T> {
    pub(crate) fn new(uow: &'u UnitOfWork) -> Self {
        Self {
            uow,
            _entity: PhantomData,
        }
    }

    pub fn add(&self, entity: &T) -> AppResult<()> {
        self.uow.stage(StagedWrite::insert(entity)?);
        Ok(())
    }

    pub fn add_range<'a>(&self, entities: impl IntoIterator<Item = &'a T>) -> AppResult<()>
    where
        T: 'a,
    {
        for entity in entities {
            self.add(entity)?;
        }
        Ok(())
    }

    /// Stages a full overwrite of the row's columns. Rows that are
    /// soft-deleted by the time of the flush are left alone.
    pub fn update(&self, entity: &T) -> AppResult<()> {
        self.uow.stage(StagedWrite::update(entity)?);
        Ok(())
    }
}

impl<'u, T: SoftDeletable> Repository<'u, T> {
    pub fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        first(self.uow.conn(), Visibility::Live, id)
    }

    pub fn get_all(&self) -> AppResult<Vec<T>> {
        select_rows(self.uow.conn(), Visibility::Live, &Filter::new())
    }

    pub fn find(&self, filter: &Filter) -> AppResult<Vec<T>> {
        select_rows(self.uow.conn(), Visibility::Live, filter)
    }

    /// Live rows whose `column` is one of `ids`, fetched in chunks.
    pub fn find_in(&self, column: &'static str, ids: &[Uuid]) -> AppResult<Vec<T>> {
        let mut out = Vec::new();
        for chunk in ids.chunks(ID_CHUNK) {
            let filter = Filter::new().is_in(column, chunk.iter().copied());
            out.extend(select_rows(self.uow.conn(), Visibility::Live, &filter)?);
        }
        Ok(out)
    }

    pub fn get_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<T>> {
        self.find_in("id", ids)
    }

    pub fn count(&self, filter: &Filter) -> AppResult<i64> {
        count_rows::<T>(self.uow.conn(), Visibility::Live, filter)
    }

    pub fn any(&self, filter: &Filter) -> AppResult<bool> {
        Ok(self.count(filter)? > 0)
    }

    /// Stages a soft delete: the row stays, flagged and timestamped, and
    /// disappears from every live read once flushed.
    pub fn soft_delete(&self, entity: &T) -> AppResult<()> {
        self.uow.stage(StagedWrite::SoftDelete {
            table: T::TABLE,
            id: entity.id(),
        });
        Ok(())
    }

    /// The administrative read path that sees deleted rows.
    pub fn bypass_filter(&self) -> BypassRepository<'u, T> {
        BypassRepository {
            uow: self.uow,
            _entity: PhantomData,
        }
    }
}

/// Reads and writes that ignore the soft-delete rule.
pub struct BypassRepository<'u, T> {
    uow: &'u UnitOfWork,
    _entity: PhantomData<T>,
}

impl<'u, T: SoftDeletable> BypassRepository<'u, T> {
    pub fn get_by_id(&self, id: Uuid) -> AppResult<Option<T>> {
        first(self.uow.conn(), Visibility::IncludeDeleted, id)
    }

    pub fn get_all(&self) -> AppResult<Vec<T>> {
        select_rows(self.uow.conn(), Visibility::IncludeDeleted, &Filter::new())
    }

    pub fn find(&self, filter: &Filter) -> AppResult<Vec<T>> {
        select_rows(self.uow.conn(), Visibility::IncludeDeleted, filter)
    }

    pub fn only_deleted(&self) -> AppResult<Vec<T>> {
        select_rows(self.uow.conn(), Visibility::OnlyDeleted, &Filter::new())
    }

    pub fn restore(&self, entity: &T) -> AppResult<()> {
        self.uow.stage(StagedWrite::Restore {
            table: T::TABLE,
            id: entity.id(),
        });
        Ok(())
    }

    /// Physically removes the row at flush time.
    pub fn hard_delete(&self, entity: &T) -> AppResult<()> {
        self.uow.stage(StagedWrite::Delete {
            table: T::TABLE,
            id: entity.id(),
        });
        Ok(())
    }
}

fn first<T: Entity>(conn: &Connection, visibility: Visibility, id: Uuid) -> AppResult<Option<T>> {
    let filter = Filter::new().eq("id", id).limit(1);
    Ok(select_rows(conn, visibility, &filter)?.into_iter().next())
}

fn where_clause(visibility: Visibility, filter: &Filter, params: &mut Vec<rusqlite::types::Value>) -> String {
    let mut conds: Vec<String> = visibility.condition().map(str::to_string).into_iter().collect();
    conds.extend(filter.conditions(params));
    if conds.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conds.join(" AND "))
    }
}

pub(crate) fn select_rows<T: Entity>(
    conn: &Connection,
    visibility: Visibility,
    filter: &Filter,
) -> AppResult<Vec<T>> {
    let mut params = Vec::new();
    let sql = format!(
        "SELECT {} FROM {}{}{}",
        column_list::<T>(),
        T::TABLE,
        where_clause(visibility, filter, &mut params),
        filter.tail()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), |row| T::from_row(row))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn count_rows<T: Entity>(conn: &Connection, visibility: Visibility, filter: &Filter) -> AppResult<i64> {
    let mut params = Vec::new();
    let sql = format!(
        "SELECT COUNT(*) FROM {}{}",
        T::TABLE,
        where_clause(visibility, filter, &mut params)
    );
    let n = conn.query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))?;
    Ok(n)
}
