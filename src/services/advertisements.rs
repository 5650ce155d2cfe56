// src/services/advertisements.rs

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::ListingConfig;
use crate::db::{Database, Entity};
use crate::domain::listing::Advertisement;
use crate::domain::logic::number_images;
use crate::domain::requests::CreateAdvertisementRequest;
use crate::domain::vehicle::Vehicle;
use crate::errors::AppResult;
use crate::images::ImageStore;

/// Creates a vehicle, its images and its advertisement as one unit.
#[derive(Debug, Clone)]
pub struct AdvertisementService {
    db: Database,
    config: ListingConfig,
}

impl AdvertisementService {
    pub fn new(db: Database, config: ListingConfig) -> Self {
        Self { db, config }
    }

    /// Runs the creation workflow for `user_id` and returns the new
    /// advertisement's id.
    ///
    /// All rows are written in one transaction with a single save. Uploads
    /// go to `images` before that transaction opens; if the upload or any
    /// later step fails, the rows are rolled back and the stored files for
    /// the vehicle are deleted again. Invalid requests fail before anything
    /// is written.
    pub fn create_advertisement(
        &self,
        user_id: Uuid,
        request: &CreateAdvertisementRequest,
        images: &dyn ImageStore,
    ) -> AppResult<Uuid> {
        request.validate()?;

        let mut vehicle = request.vehicle.to_vehicle()?;
        vehicle.description = Some(request.description.trim().to_string());
        let vehicle_id = vehicle.id();

        let stored_images = !request.images.is_empty();
        let result = self.write_advertisement(user_id, request, &vehicle, images);

        match result {
            Ok((ad_id, image_count)) => {
                info!(
                    advertisement_id = %ad_id,
                    vehicle_id = %vehicle_id,
                    images = image_count,
                    "advertisement created"
                );
                Ok(ad_id)
            }
            Err(e) => {
                if stored_images {
                    warn!(vehicle_id = %vehicle_id, error = %e, "advertisement creation failed; removing stored images");
                    if let Err(cleanup) = images.delete_images(vehicle_id) {
                        error!(vehicle_id = %vehicle_id, error = %cleanup, "failed to remove orphaned images");
                    }
                }
                Err(e)
            }
        }
    }

    /// Uploads, then writes every row in one transaction. No store lock is
    /// held while the upload runs.
    fn write_advertisement(
        &self,
        user_id: Uuid,
        request: &CreateAdvertisementRequest,
        vehicle: &Vehicle,
        images: &dyn ImageStore,
    ) -> AppResult<(Uuid, usize)> {
        let vehicle_id = vehicle.id();
        let urls = if request.images.is_empty() {
            Vec::new()
        } else {
            images.save_images(vehicle_id, &request.images)?
        };

        let mut ad = Advertisement::publish(
            vehicle_id,
            user_id,
            request.title.trim(),
            request.description.trim(),
            vehicle.price,
            self.config.listing_ttl_days,
        );
        ad.is_negotiable = request.is_negotiable;
        ad.contact_phone = request.contact_phone.clone();

        let uow = self.db.unit_of_work()?;
        uow.transaction(|uow| {
            uow.vehicles().add(vehicle)?;
            uow.vehicle_images().add_range(&number_images(vehicle_id, &urls))?;
            uow.advertisements().add(&ad)?;
            uow.save_changes()
        })?;

        Ok((ad.id(), urls.len()))
    }
}
