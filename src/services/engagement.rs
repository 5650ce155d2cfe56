// src/services/engagement.rs

use tracing::debug;
use uuid::Uuid;

use crate::db::{Database, Entity};
use crate::domain::listing::Favorite;
use crate::errors::AppResult;

/// Which counter of an advertisement to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counter {
    Views,
    Contacts,
}

/// Read-modify-write of a counter under the write lock, so concurrent bumps
/// are never lost.
fn bump(db: &Database, ad_id: Uuid, counter: Counter) -> AppResult<Option<i64>> {
    let uow = db.unit_of_work()?;
    let value = uow.transaction(|uow| {
        let Some(mut ad) = uow.advertisements().get_by_id(ad_id)? else {
            return Ok(None);
        };

        let value = match counter {
            Counter::Views => {
                ad.view_count += 1;
                ad.view_count
            }
            Counter::Contacts => {
                ad.contact_count += 1;
                ad.contact_count
            }
        };
        uow.advertisements().update(&ad)?;
        uow.save_changes()?;
        Ok(Some(value))
    })?;

    if let Some(value) = value {
        debug!(advertisement_id = %ad_id, ?counter, value, "counter incremented");
    }
    Ok(value)
}

/// Counts one view; returns the new total, or `None` for an unknown ad.
pub fn record_view(db: &Database, ad_id: Uuid) -> AppResult<Option<i64>> {
    bump(db, ad_id, Counter::Views)
}

pub fn record_contact(db: &Database, ad_id: Uuid) -> AppResult<Option<i64>> {
    bump(db, ad_id, Counter::Contacts)
}

/// Bookmarks an advertisement for a user and bumps its favorite counter in
/// the same transaction. `None` when the advertisement is not live. A second
/// bookmark of the same pair fails with a constraint violation and leaves
/// the counter untouched.
pub fn add_favorite(
    db: &Database,
    user_id: Uuid,
    ad_id: Uuid,
    notes: Option<String>,
) -> AppResult<Option<Uuid>> {
    let uow = db.unit_of_work()?;
    uow.transaction(|uow| {
        // Read under the write lock so the count never starts from a stale copy.
        let Some(mut ad) = uow.advertisements().get_by_id(ad_id)? else {
            return Ok(None);
        };

        let favorite = Favorite::new(user_id, ad_id, notes);
        uow.favorites().add(&favorite)?;
        ad.favorite_count += 1;
        uow.advertisements().update(&ad)?;
        uow.save_changes()?;
        Ok(Some(favorite.id()))
    })
}
