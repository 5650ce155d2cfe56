// src/domain/views.rs

//! Read-side projections handed to callers. None of these are persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::enums::AdvertisementStatus;

/// One row of a search result or listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleListItem {
    pub id: Uuid,
    pub make_name: String,
    pub model_name: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i64,
    pub city: String,
    /// The image flagged main, else the first by display order.
    pub main_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleView {
    pub id: Uuid,
    pub make_name: String,
    pub model_name: String,
    pub year: i32,
    pub mileage: i64,
    pub price: f64,
    pub fuel_type: String,
    pub transmission_type: String,
    pub color: Option<String>,
    pub city: String,
    /// Ordered by display order.
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleDetails {
    pub id: Uuid,
    pub make_name: String,
    pub model_name: String,
    pub year: i32,
    pub mileage: i64,
    pub price: f64,
    pub fuel_type: String,
    pub transmission_type: String,
    pub body_style: Option<String>,
    pub condition: String,
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
    pub features: Vec<String>,
    pub vin: Option<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MakeSummary {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSummary {
    pub id: Uuid,
    pub make_id: Uuid,
    pub name: String,
    pub make_name: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleTypeSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MakeDetails {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub country: Option<String>,

    pub active_advertisements_count: i64,
    /// Rounded to whole units; zero when the make has no vehicles.
    pub average_price: f64,
    pub recent_advertisements_count: i64,

    pub models: Vec<ModelSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub active_ads: i64,
    pub total_views: i64,
    pub total_favorites: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminOverview {
    pub total_users: i64,
    pub total_makes: i64,
    pub total_models: i64,
    pub total_vehicles: i64,
    pub total_advertisements: i64,
    pub active_advertisements: i64,
}

/// A row of the "my advertisements" dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAdvertisement {
    pub advertisement_id: Uuid,
    pub vehicle_id: Uuid,
    pub title: String,
    pub make_name: String,
    pub model_name: String,
    pub year: i32,
    pub price: f64,
    pub status: AdvertisementStatus,
    pub view_count: i64,
    pub favorite_count: i64,
    pub published_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub main_image: Option<String>,
}

/// One page of an already-filtered listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}
