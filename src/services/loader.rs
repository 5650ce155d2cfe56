// src/services/loader.rs

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::db::{Entity, UnitOfWork};
use crate::domain::catalog::{Make, Model};
use crate::domain::logic::{parse_features, select_main_image};
use crate::domain::vehicle::{Vehicle, VehicleImage};
use crate::domain::views::{VehicleDetails, VehicleListItem, VehicleView};
use crate::errors::AppResult;

/// Makes, models and images for a batch of vehicles, fetched with one
/// query per table.
///
/// Soft-deleted makes and models resolve to an empty name, deleted images
/// are left out.
#[derive(Debug, Default)]
pub struct ListingLoader {
    makes: HashMap<Uuid, Make>,
    models: HashMap<Uuid, Model>,
    /// Keyed by vehicle id, sorted by display order.
    images: HashMap<Uuid, Vec<VehicleImage>>,
}

impl ListingLoader {
    pub fn load(uow: &UnitOfWork, vehicles: &[Vehicle]) -> AppResult<Self> {
        if vehicles.is_empty() {
            return Ok(Self::default());
        }

        let make_ids = distinct(vehicles.iter().map(|v| v.make_id));
        let model_ids = distinct(vehicles.iter().map(|v| v.model_id));
        let vehicle_ids: Vec<Uuid> = vehicles.iter().map(|v| v.id()).collect();

        let makes = uow
            .makes()
            .get_by_ids(&make_ids)?
            .into_iter()
            .map(|m| (m.id(), m))
            .collect();
        let models = uow
            .models()
            .get_by_ids(&model_ids)?
            .into_iter()
            .map(|m| (m.id(), m))
            .collect();

        let mut images: HashMap<Uuid, Vec<VehicleImage>> = HashMap::new();
        for image in uow.vehicle_images().find_in("vehicle_id", &vehicle_ids)? {
            images.entry(image.vehicle_id).or_default().push(image);
        }
        for list in images.values_mut() {
            list.sort_by_key(|img| img.display_order);
        }

        Ok(Self {
            makes,
            models,
            images,
        })
    }

    pub fn make_name(&self, make_id: Uuid) -> String {
        self.makes
            .get(&make_id)
            .map(|m| m.name.clone())
            .unwrap_or_default()
    }

    pub fn model_name(&self, model_id: Uuid) -> String {
        self.models
            .get(&model_id)
            .map(|m| m.name.clone())
            .unwrap_or_default()
    }

    pub fn images_for(&self, vehicle_id: Uuid) -> &[VehicleImage] {
        self.images
            .get(&vehicle_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn main_image(&self, vehicle_id: Uuid) -> Option<String> {
        select_main_image(self.images_for(vehicle_id)).map(|img| img.image_url.clone())
    }

    fn image_urls(&self, vehicle_id: Uuid) -> Vec<String> {
        self.images_for(vehicle_id)
            .iter()
            .map(|img| img.image_url.clone())
            .collect()
    }

    pub fn list_item(&self, vehicle: &Vehicle) -> VehicleListItem {
        VehicleListItem {
            id: vehicle.id(),
            make_name: self.make_name(vehicle.make_id),
            model_name: self.model_name(vehicle.model_id),
            year: vehicle.year,
            price: vehicle.price,
            mileage: vehicle.mileage,
            city: vehicle.city.clone(),
            main_image: self.main_image(vehicle.id()),
        }
    }

    pub fn view(&self, vehicle: &Vehicle) -> VehicleView {
        VehicleView {
            id: vehicle.id(),
            make_name: self.make_name(vehicle.make_id),
            model_name: self.model_name(vehicle.model_id),
            year: vehicle.year,
            mileage: vehicle.mileage,
            price: vehicle.price,
            fuel_type: vehicle.fuel_type.to_string(),
            transmission_type: vehicle.transmission_type.to_string(),
            color: vehicle.color.clone(),
            city: vehicle.city.clone(),
            images: self.image_urls(vehicle.id()),
        }
    }

    pub fn details(&self, vehicle: &Vehicle) -> VehicleDetails {
        VehicleDetails {
            id: vehicle.id(),
            make_name: self.make_name(vehicle.make_id),
            model_name: self.model_name(vehicle.model_id),
            year: vehicle.year,
            mileage: vehicle.mileage,
            price: vehicle.price,
            fuel_type: vehicle.fuel_type.to_string(),
            transmission_type: vehicle.transmission_type.to_string(),
            body_style: vehicle.body_style.map(|b| b.to_string()),
            condition: vehicle.condition.to_string(),
            engine_size: vehicle.engine_size,
            horse_power: vehicle.horse_power,
            cylinders: vehicle.cylinders,
            color: vehicle.color.clone(),
            interior_color: vehicle.interior_color.clone(),
            doors: vehicle.doors,
            seats: vehicle.seats,
            city: vehicle.city.clone(),
            region: vehicle.region.clone(),
            country: vehicle.country.clone(),
            description: vehicle.description.clone(),
            features: parse_features(vehicle.features.as_deref()),
            vin: vehicle.vin.clone(),
            images: self.image_urls(vehicle.id()),
            created_at: vehicle.header.created_at,
        }
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}
