// src/domain/requests.rs

//! Caller-supplied inputs to the listing workflows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::filter::{Filter, Predicate};
use crate::domain::enums::{BodyStyle, FuelType, TransmissionType, VehicleCondition};
use crate::domain::vehicle::Vehicle;
use crate::errors::{AppError, AppResult};
use crate::images::ImageUpload;

pub const YEAR_RANGE: (i32, i32) = (1900, 2030);
pub const MAX_MILEAGE: i64 = 2_000_000;
pub const MAX_PRICE: f64 = 10_000_000.0;
pub const TITLE_LEN: (usize, usize) = (10, 150);
pub const DESCRIPTION_LEN: (usize, usize) = (30, 5000);

macro_rules! ensure {
    ($cond:expr, $($msg:tt)+) => {
        if !$cond {
            return Err(AppError::Validation(format!($($msg)+)));
        }
    };
}

/// Optional equipment ticked on the listing form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub air_conditioning: bool,
    pub navigation: bool,
    pub leather_seats: bool,
    pub parking_sensors: bool,
    pub rear_camera: bool,
    pub heated_seats: bool,
    pub sunroof: bool,
    pub alloy_wheels: bool,
    pub bluetooth: bool,
    pub cruise_control: bool,
    pub xenon: bool,
    pub led: bool,
    pub keyless_entry: bool,
    pub start_stop: bool,
}

impl FeatureSet {
    /// Labels of the ticked features, in form order.
    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.air_conditioning, "Air conditioning"),
            (self.navigation, "Navigation"),
            (self.leather_seats, "Leather seats"),
            (self.parking_sensors, "Parking sensors"),
            (self.rear_camera, "Rear camera"),
            (self.heated_seats, "Heated seats"),
            (self.sunroof, "Sunroof"),
            (self.alloy_wheels, "Alloy wheels"),
            (self.bluetooth, "Bluetooth"),
            (self.cruise_control, "Cruise control"),
            (self.xenon, "Xenon"),
            (self.led, "LED"),
            (self.keyless_entry, "Keyless entry"),
            (self.start_stop, "Start/Stop"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }

    /// JSON array of labels; `None` when nothing is ticked.
    pub fn to_json(&self) -> AppResult<Option<String>> {
        let labels = self.labels();
        if labels.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&labels)?))
    }
}

/// Everything needed to create or overwrite a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleInput {
    pub make_id: Uuid,
    pub model_id: Uuid,
    pub vehicle_type_id: Option<Uuid>,

    pub year: i32,
    pub mileage: i64,
    pub price: f64,
    pub vin: Option<String>,

    pub fuel_type: FuelType,
    pub transmission_type: TransmissionType,
    pub body_style: Option<BodyStyle>,
    pub condition: VehicleCondition,
    pub engine_size: Option<f64>,
    pub horse_power: Option<i32>,
    pub cylinders: Option<i32>,
    pub color: Option<String>,
    pub interior_color: Option<String>,
    pub doors: Option<i32>,
    pub seats: Option<i32>,

    pub city: String,
    pub region: Option<String>,
    pub description: Option<String>,
    pub features: FeatureSet,
}

impl VehicleInput {
    pub fn new(
        make_id: Uuid,
        model_id: Uuid,
        year: i32,
        mileage: i64,
        price: f64,
        city: impl Into<String>,
    ) -> Self {
        Self {
            make_id,
            model_id,
            vehicle_type_id: None,
            year,
            mileage,
            price,
            vin: None,
            fuel_type: FuelType::Petrol,
            transmission_type: TransmissionType::Manual,
            body_style: None,
            condition: VehicleCondition::Used,
            engine_size: None,
            horse_power: None,
            cylinders: None,
            color: None,
            interior_color: None,
            doors: None,
            seats: None,
            city: city.into(),
            region: None,
            description: None,
            features: FeatureSet::default(),
        }
    }

    /// Range checks only. Whether the make and model exist is left to the
    /// store's foreign keys.
    pub fn validate(&self) -> AppResult<()> {
        let (min_year, max_year) = YEAR_RANGE;
        ensure!(
            (min_year..=max_year).contains(&self.year),
            "year must be between {min_year} and {max_year}"
        );
        ensure!(
            (0..=MAX_MILEAGE).contains(&self.mileage),
            "mileage must be between 0 and {MAX_MILEAGE}"
        );
        ensure!(
            self.price.is_finite() && (0.0..=MAX_PRICE).contains(&self.price),
            "price must be between 0 and {MAX_PRICE}"
        );
        ensure!(!self.city.trim().is_empty(), "city is required");
        Ok(())
    }

    /// A new vehicle with a fresh id.
    pub fn to_vehicle(&self) -> AppResult<Vehicle> {
        let mut vehicle = Vehicle::new(
            self.make_id,
            self.model_id,
            self.year,
            self.mileage,
            self.price,
            self.city.trim(),
        );
        self.apply_to(&mut vehicle)?;
        Ok(vehicle)
    }

    /// Overwrites the editable fields of `vehicle`, keeping its header.
    pub fn apply_to(&self, vehicle: &mut Vehicle) -> AppResult<()> {
        vehicle.make_id = self.make_id;
        vehicle.model_id = self.model_id;
        vehicle.vehicle_type_id = self.vehicle_type_id;
        vehicle.year = self.year;
        vehicle.mileage = self.mileage;
        vehicle.price = self.price;
        vehicle.vin = self.vin.clone().filter(|v| !v.trim().is_empty());
        vehicle.fuel_type = self.fuel_type;
        vehicle.transmission_type = self.transmission_type;
        vehicle.body_style = self.body_style;
        vehicle.condition = self.condition;
        vehicle.engine_size = self.engine_size;
        vehicle.horse_power = self.horse_power;
        vehicle.cylinders = self.cylinders;
        vehicle.color = self.color.clone();
        vehicle.interior_color = self.interior_color.clone();
        vehicle.doors = self.doors;
        vehicle.seats = self.seats;
        vehicle.city = self.city.trim().to_string();
        vehicle.region = self.region.clone();
        vehicle.description = self.description.clone();
        vehicle.features = self.features.to_json()?;
        Ok(())
    }
}

/// Input of the advertisement creation workflow.
///
/// `description` is used for both the advertisement and the vehicle. The
/// advertisement price is the vehicle price.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAdvertisementRequest {
    pub vehicle: VehicleInput,
    pub title: String,
    pub description: String,
    pub is_negotiable: bool,
    pub contact_phone: Option<String>,
    pub images: Vec<ImageUpload>,
}

impl CreateAdvertisementRequest {
    pub fn validate(&self) -> AppResult<()> {
        self.vehicle.validate()?;

        let (min_title, max_title) = TITLE_LEN;
        let title_len = self.title.trim().chars().count();
        ensure!(
            (min_title..=max_title).contains(&title_len),
            "title must be {min_title} to {max_title} characters"
        );

        let (min_desc, max_desc) = DESCRIPTION_LEN;
        let desc_len = self.description.trim().chars().count();
        ensure!(
            (min_desc..=max_desc).contains(&desc_len),
            "description must be {min_desc} to {max_desc} characters"
        );
        Ok(())
    }
}

/// Vehicle search filters. Every field is optional and unset fields do not
/// filter; set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub make_id: Option<Uuid>,
    pub model_id: Option<Uuid>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub mileage_from: Option<i64>,
    pub mileage_to: Option<i64>,
    /// Case-sensitive substring of the vehicle's city.
    pub city: Option<String>,
}

impl SearchCriteria {
    /// One slot per criterion; bounds are inclusive.
    pub fn predicates(&self) -> [Option<Predicate>; 9] {
        [
            self.make_id.map(|id| Predicate::eq("make_id", id)),
            self.model_id.map(|id| Predicate::eq("model_id", id)),
            self.year_from.map(|y| Predicate::ge("year", y)),
            self.year_to.map(|y| Predicate::le("year", y)),
            self.price_from.map(|p| Predicate::ge("price", p)),
            self.price_to.map(|p| Predicate::le("price", p)),
            self.mileage_from.map(|m| Predicate::ge("mileage", m)),
            self.mileage_to.map(|m| Predicate::le("mileage", m)),
            self.city
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(|c| Predicate::contains("city", c)),
        ]
    }

    pub fn to_filter(&self) -> Filter {
        self.predicates()
            .into_iter()
            .flatten()
            .fold(Filter::new(), Filter::and)
    }
}
