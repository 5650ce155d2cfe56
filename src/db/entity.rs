// src/db/entity.rs

use rusqlite::types::{ToSql, ToSqlOutput, Value};
use rusqlite::Row;
use uuid::Uuid;

use crate::domain::audit::AuditHeader;

/// Header columns, always selected and inserted first.
pub const HEADER_COLUMNS: [&str; 5] = ["id", "created_at", "updated_at", "deleted_at", "is_deleted"];

/// A row type stored in one table.
pub trait Entity: Clone {
    const TABLE: &'static str;
    /// Columns after the header, in the order `values` produces them.
    const COLUMNS: &'static [&'static str];

    fn header(&self) -> &AuditHeader;
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    fn values(&self) -> rusqlite::Result<Vec<Value>>;

    fn id(&self) -> Uuid {
        self.header().id
    }
}

/// Entities whose rows are hidden rather than removed.
///
/// Repository reads for these types always carry `is_deleted = 0` unless a
/// caller goes through the explicit bypass handle.
pub trait SoftDeletable: Entity {}

/// Which rows a read may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Live,
    IncludeDeleted,
    OnlyDeleted,
}

impl Visibility {
    pub(crate) fn condition(self) -> Option<&'static str> {
        match self {
            Visibility::Live => Some("is_deleted = 0"),
            Visibility::IncludeDeleted => None,
            Visibility::OnlyDeleted => Some("is_deleted = 1"),
        }
    }
}

/// Converts anything rusqlite can bind into an owned value, using the
/// same encoding rusqlite itself would (chrono text, uuid blobs).
pub fn sql_value<T: ToSql + ?Sized>(value: &T) -> rusqlite::Result<Value> {
    match value.to_sql()? {
        ToSqlOutput::Borrowed(v) => Ok(v.into()),
        ToSqlOutput::Owned(v) => Ok(v),
        #[allow(unreachable_patterns)]
        _ => Err(rusqlite::Error::ToSqlConversionFailure(
            "unsupported SQL output".into(),
        )),
    }
}

/// `sql_values![a, b, c]` builds a `Vec<Value>`, returning early on the
/// first conversion error.
macro_rules! sql_values {
    ($($field:expr),* $(,)?) => {
        vec![$($crate::db::entity::sql_value(&$field)?),*]
    };
}
pub(crate) use sql_values;

pub(crate) fn header_from_row(row: &Row<'_>) -> rusqlite::Result<AuditHeader> {
    Ok(AuditHeader {
        id: row.get("id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        deleted_at: row.get("deleted_at")?,
        is_deleted: row.get("is_deleted")?,
    })
}

pub(crate) fn header_values(header: &AuditHeader) -> rusqlite::Result<Vec<Value>> {
    Ok(sql_values![
        header.id,
        header.created_at,
        header.updated_at,
        header.deleted_at,
        header.is_deleted,
    ])
}

/// Comma-separated header plus entity columns.
pub(crate) fn column_list<T: Entity>() -> String {
    HEADER_COLUMNS
        .iter()
        .chain(T::COLUMNS.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
