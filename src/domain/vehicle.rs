// src/domain/vehicle.rs

use uuid::Uuid;

use crate::domain::audit::AuditHeader;
use crate::domain::enums::{BodyStyle, FuelType, TransmissionType, VehicleCondition};

pub const DEFAULT_COUNTRY: &str = "Bulgaria";

/// A single car offered for sale.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub header: AuditHeader,

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
    pub country: String,

    pub description: Option<String>,
    /// JSON array of feature labels.
    pub features: Option<String>,
}

impl Vehicle {
    /// A used petrol manual in `city`; callers fill in the rest.
    pub fn new(
        make_id: Uuid,
        model_id: Uuid,
        year: i32,
        mileage: i64,
        price: f64,
        city: impl Into<String>,
    ) -> Self {
        Self {
            header: AuditHeader::new(),
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
            country: DEFAULT_COUNTRY.to_string(),
            description: None,
            features: None,
        }
    }
}

/// One ordered photo of a vehicle. `display_order` starts at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleImage {
    pub header: AuditHeader,
    pub vehicle_id: Uuid,
    pub image_url: String,
    pub is_main: bool,
    pub display_order: i32,
    pub caption: Option<String>,
}

impl VehicleImage {
    pub fn new(vehicle_id: Uuid, image_url: impl Into<String>, display_order: i32) -> Self {
        Self {
            header: AuditHeader::new(),
            vehicle_id,
            image_url: image_url.into(),
            is_main: false,
            display_order,
            caption: None,
        }
    }
}
