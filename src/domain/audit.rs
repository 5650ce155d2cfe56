// src/domain/audit.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identity and lifecycle fields shared by every stored entity.
///
/// `created_at` is fixed when the header is built. `updated_at` and the
/// deletion fields are written by the unit of work at save time, never by
/// callers.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditHeader {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl AuditHeader {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
            is_deleted: false,
        }
    }
}

impl Default for AuditHeader {
    fn default() -> Self {
        Self::new()
    }
}
