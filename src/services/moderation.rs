// src/services/moderation.rs

//! Administrative actions on advertisements and users.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::db::{Database, Filter};
use crate::domain::enums::AdvertisementStatus;
use crate::domain::listing::Advertisement;
use crate::domain::views::AdminOverview;
use crate::errors::AppResult;

/// Marks an advertisement active and re-stamps its publication time.
pub fn approve_advertisement(db: &Database, ad_id: Uuid) -> AppResult<bool> {
    let uow = db.unit_of_work()?;
    let Some(mut ad) = uow.advertisements().get_by_id(ad_id)? else {
        return Ok(false);
    };

    ad.status = AdvertisementStatus::Active;
    ad.published_at = Utc::now();
    uow.advertisements().update(&ad)?;
    uow.save_changes()?;

    info!(advertisement_id = %ad_id, "advertisement approved");
    Ok(true)
}

pub fn delete_advertisement(db: &Database, ad_id: Uuid) -> AppResult<bool> {
    let uow = db.unit_of_work()?;
    let Some(ad) = uow.advertisements().get_by_id(ad_id)? else {
        return Ok(false);
    };
    uow.advertisements().soft_delete(&ad)?;
    uow.save_changes()?;

    info!(advertisement_id = %ad_id, "advertisement deleted");
    Ok(true)
}

/// Brings back a soft-deleted advertisement. False unless the id names a
/// deleted row.
pub fn restore_advertisement(db: &Database, ad_id: Uuid) -> AppResult<bool> {
    let uow = db.unit_of_work()?;
    let deleted = uow.advertisements().bypass_filter();
    let Some(ad) = deleted.get_by_id(ad_id)?.filter(|ad| ad.header.is_deleted) else {
        return Ok(false);
    };
    deleted.restore(&ad)?;
    let restored = uow.save_changes()? > 0;
    if restored {
        info!(advertisement_id = %ad_id, "advertisement restored");
    }
    Ok(restored)
}

pub fn list_deleted_advertisements(db: &Database) -> AppResult<Vec<Advertisement>> {
    let uow = db.unit_of_work()?;
    uow.advertisements().bypass_filter().only_deleted()
}

/// Flips a user's active flag and returns the new value; `None` for an
/// unknown user.
pub fn toggle_user_status(db: &Database, user_id: Uuid) -> AppResult<Option<bool>> {
    let uow = db.unit_of_work()?;
    let Some(mut user) = uow.users().get_by_id(user_id)? else {
        return Ok(None);
    };
    user.is_active = !user.is_active;
    uow.users().update(&user)?;
    uow.save_changes()?;
    Ok(Some(user.is_active))
}

/// Live row counts for the admin dashboard.
pub fn admin_overview(db: &Database) -> AppResult<AdminOverview> {
    let uow = db.unit_of_work()?;
    let all = Filter::new();
    Ok(AdminOverview {
        total_users: uow.users().count(&all)?,
        total_makes: uow.makes().count(&all)?,
        total_models: uow.models().count(&all)?,
        total_vehicles: uow.vehicles().count(&all)?,
        total_advertisements: uow.advertisements().count(&all)?,
        active_advertisements: uow
            .advertisements()
            .count(&Filter::new().eq("status", AdvertisementStatus::Active.as_i64()))?,
    })
}
