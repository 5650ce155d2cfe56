// src/services/listings.rs

use std::collections::HashMap;

use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{Database, Entity, Filter, Order, UnitOfWork};
use crate::domain::listing::SavedSearch;
use crate::domain::logic::paginate;
use crate::domain::requests::{SearchCriteria, VehicleInput};
use crate::domain::vehicle::Vehicle;
use crate::domain::views::{Page, UserAdvertisement, VehicleDetails, VehicleListItem, VehicleView};
use crate::errors::AppResult;
use crate::images::ImageStore;
use crate::services::loader::ListingLoader;

/// Vehicle search, listing pages and single-vehicle CRUD.
///
/// Each call opens its own unit of work.
#[derive(Debug, Clone)]
pub struct ListingService {
    db: Database,
}

impl ListingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn search_vehicles(&self, criteria: &SearchCriteria) -> AppResult<Vec<VehicleListItem>> {
        let uow = self.db.unit_of_work()?;
        let vehicles = uow.vehicles().find(&criteria.to_filter())?;
        list_items(&uow, &vehicles)
    }

    pub fn search_page(
        &self,
        criteria: &SearchCriteria,
        page: usize,
        page_size: usize,
    ) -> AppResult<Page<VehicleListItem>> {
        Ok(paginate(self.search_vehicles(criteria)?, page, page_size))
    }

    pub fn get_all_vehicles(&self) -> AppResult<Vec<VehicleListItem>> {
        self.search_vehicles(&SearchCriteria::default())
    }

    /// The first `count` vehicles in insertion order. The featured flag on
    /// advertisements is not consulted.
    pub fn get_featured(&self, count: usize) -> AppResult<Vec<VehicleListItem>> {
        let uow = self.db.unit_of_work()?;
        let vehicles = uow.vehicles().find(&Filter::new().limit(count))?;
        list_items(&uow, &vehicles)
    }

    /// The `count` most recently created vehicles, newest first.
    pub fn get_latest(&self, count: usize) -> AppResult<Vec<VehicleListItem>> {
        let uow = self.db.unit_of_work()?;
        let filter = Filter::new().order_by("created_at", Order::Desc).limit(count);
        let vehicles = uow.vehicles().find(&filter)?;
        list_items(&uow, &vehicles)
    }

    pub fn get_vehicle_by_id(&self, id: Uuid) -> AppResult<Option<VehicleView>> {
        let uow = self.db.unit_of_work()?;
        let Some(vehicle) = uow.vehicles().get_by_id(id)? else {
            return Ok(None);
        };
        let loader = ListingLoader::load(&uow, std::slice::from_ref(&vehicle))?;
        Ok(Some(loader.view(&vehicle)))
    }

    pub fn get_vehicle_details(&self, id: Uuid) -> AppResult<Option<VehicleDetails>> {
        let uow = self.db.unit_of_work()?;
        let Some(vehicle) = uow.vehicles().get_by_id(id)? else {
            return Ok(None);
        };
        let loader = ListingLoader::load(&uow, std::slice::from_ref(&vehicle))?;
        Ok(Some(loader.details(&vehicle)))
    }

    pub fn create_vehicle(&self, input: &VehicleInput) -> AppResult<VehicleView> {
        input.validate()?;
        let vehicle = input.to_vehicle()?;

        let uow = self.db.unit_of_work()?;
        uow.vehicles().add(&vehicle)?;
        uow.save_changes()?;

        info!(vehicle_id = %vehicle.id(), "vehicle created");
        let loader = ListingLoader::load(&uow, std::slice::from_ref(&vehicle))?;
        Ok(loader.view(&vehicle))
    }

    /// Overwrites a live vehicle. `None` when it is absent or deleted.
    pub fn update_vehicle(&self, id: Uuid, input: &VehicleInput) -> AppResult<Option<VehicleView>> {
        input.validate()?;

        let uow = self.db.unit_of_work()?;
        let Some(mut vehicle) = uow.vehicles().get_by_id(id)? else {
            return Ok(None);
        };
        input.apply_to(&mut vehicle)?;
        uow.vehicles().update(&vehicle)?;
        uow.save_changes()?;

        let loader = ListingLoader::load(&uow, std::slice::from_ref(&vehicle))?;
        Ok(Some(loader.view(&vehicle)))
    }

    /// Soft-deletes a live vehicle and then drops its stored images.
    ///
    /// Returns false when no visible vehicle has this id. The image cleanup is
    /// best effort; the delete stands even if it fails. The vehicle's
    /// advertisement and image rows are not touched.
    pub fn delete_vehicle(&self, id: Uuid, images: &dyn ImageStore) -> AppResult<bool> {
        let uow = self.db.unit_of_work()?;
        let Some(vehicle) = uow.vehicles().get_by_id(id)? else {
            return Ok(false);
        };
        uow.vehicles().soft_delete(&vehicle)?;
        uow.save_changes()?;

        if let Err(e) = images.delete_images(id) {
            warn!(vehicle_id = %id, error = %e, "failed to delete stored images");
        }
        info!(vehicle_id = %id, "vehicle deleted");
        Ok(true)
    }

    /// The user's live advertisements, newest first. Advertisements whose
    /// vehicle has been deleted are skipped.
    pub fn get_user_advertisements(&self, user_id: Uuid) -> AppResult<Vec<UserAdvertisement>> {
        let uow = self.db.unit_of_work()?;
        let filter = Filter::new()
            .eq("user_id", user_id)
            .order_by("created_at", Order::Desc);
        let ads = uow.advertisements().find(&filter)?;

        let vehicle_ids: Vec<Uuid> = ads.iter().map(|a| a.vehicle_id).collect();
        let vehicles = uow.vehicles().get_by_ids(&vehicle_ids)?;
        let loader = ListingLoader::load(&uow, &vehicles)?;
        let by_id: HashMap<Uuid, &Vehicle> = vehicles.iter().map(|v| (v.id(), v)).collect();

        let rows = ads
            .into_iter()
            .filter_map(|ad| {
                let vehicle = *by_id.get(&ad.vehicle_id)?;
                Some(UserAdvertisement {
                    advertisement_id: ad.id(),
                    vehicle_id: vehicle.id(),
                    title: ad.title,
                    make_name: loader.make_name(vehicle.make_id),
                    model_name: loader.model_name(vehicle.model_id),
                    year: vehicle.year,
                    price: ad.price,
                    status: ad.status,
                    view_count: ad.view_count,
                    favorite_count: ad.favorite_count,
                    published_at: ad.published_at,
                    expires_at: ad.expires_at,
                    main_image: loader.main_image(vehicle.id()),
                })
            })
            .collect();
        Ok(rows)
    }

    /// Stores `criteria` under `name` for the user.
    pub fn save_search(&self, user_id: Uuid, name: &str, criteria: &SearchCriteria) -> AppResult<Uuid> {
        let search = SavedSearch::new(user_id, name.trim(), serde_json::to_string(criteria)?);

        let uow = self.db.unit_of_work()?;
        uow.saved_searches().add(&search)?;
        uow.save_changes()?;
        Ok(search.id())
    }

    /// Re-runs a saved search. `None` when the search is absent or deleted.
    pub fn run_saved_search(&self, search_id: Uuid) -> AppResult<Option<Vec<VehicleListItem>>> {
        let criteria: SearchCriteria = {
            let uow = self.db.unit_of_work()?;
            match uow.saved_searches().get_by_id(search_id)? {
                Some(search) => serde_json::from_str(&search.search_criteria)?,
                None => return Ok(None),
            }
        };
        self.search_vehicles(&criteria).map(Some)
    }
}

fn list_items(uow: &UnitOfWork, vehicles: &[Vehicle]) -> AppResult<Vec<VehicleListItem>> {
    let loader = ListingLoader::load(uow, vehicles)?;
    Ok(vehicles.iter().map(|v| loader.list_item(v)).collect())
}
