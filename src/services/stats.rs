// src/services/stats.rs

use chrono::Utc;
use uuid::Uuid;

use crate::config::ListingConfig;
use crate::db::{Database, Entity, Filter, Order};
use crate::domain::enums::AdvertisementStatus;
use crate::domain::logic::{average_price, is_within_days};
use crate::domain::views::{MakeDetails, ModelSummary, UserStats};
use crate::errors::AppResult;

/// Derived per-make and per-user figures.
#[derive(Debug, Clone)]
pub struct StatsService {
    db: Database,
    config: ListingConfig,
}

impl StatsService {
    pub fn new(db: Database, config: ListingConfig) -> Self {
        Self { db, config }
    }

    /// A make with its models and listing statistics; `None` when the make
    /// is absent or deleted.
    ///
    /// Statistics cover live vehicles of the make and the live
    /// advertisements on them. "Recent" means created within the configured
    /// window (seven days by default).
    pub fn get_make_details(&self, make_id: Uuid) -> AppResult<Option<MakeDetails>> {
        let uow = self.db.unit_of_work()?;
        let Some(make) = uow.makes().get_by_id(make_id)? else {
            return Ok(None);
        };

        let models = uow
            .models()
            .find(&Filter::new().eq("make_id", make_id).order_by("name", Order::Asc))?
            .into_iter()
            .map(|m| ModelSummary {
                id: m.id(),
                make_id: m.make_id,
                name: m.name,
                make_name: make.name.clone(),
                year_from: m.year_from,
                year_to: m.year_to,
            })
            .collect();

        let vehicles = uow.vehicles().find(&Filter::new().eq("make_id", make_id))?;
        let prices: Vec<f64> = vehicles.iter().map(|v| v.price).collect();
        let vehicle_ids: Vec<Uuid> = vehicles.iter().map(|v| v.id()).collect();
        let ads = uow.advertisements().find_in("vehicle_id", &vehicle_ids)?;

        let now = Utc::now();
        let active = ads
            .iter()
            .filter(|a| a.status == AdvertisementStatus::Active)
            .count();
        let recent = ads
            .iter()
            .filter(|a| is_within_days(a.header.created_at, now, self.config.recent_window_days))
            .count();

        Ok(Some(MakeDetails {
            id: make.id(),
            name: make.name,
            logo_url: make.logo_url,
            country: make.country,
            active_advertisements_count: active as i64,
            average_price: average_price(&prices),
            recent_advertisements_count: recent as i64,
            models,
        }))
    }

    /// Dashboard figures over the user's live advertisements. An unknown
    /// user gets all zeros.
    pub fn get_user_stats(&self, user_id: Uuid) -> AppResult<UserStats> {
        let uow = self.db.unit_of_work()?;
        let ads = uow.advertisements().find(&Filter::new().eq("user_id", user_id))?;

        let active_ads = ads
            .iter()
            .filter(|a| a.status == AdvertisementStatus::Active)
            .count() as i64;
        let total_views = ads.iter().map(|a| a.view_count).sum();

        let ad_ids: Vec<Uuid> = ads.iter().map(|a| a.id()).collect();
        let total_favorites = uow.favorites().find_in("advertisement_id", &ad_ids)?.len() as i64;

        Ok(UserStats {
            active_ads,
            total_views,
            total_favorites,
        })
    }
}
