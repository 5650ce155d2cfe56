// src/db/tables.rs

//! Table mappings for the domain entities.

use rusqlite::types::Value;
use rusqlite::Row;

use crate::db::entity::{header_from_row, sql_values, Entity, SoftDeletable};
use crate::domain::audit::AuditHeader;
use crate::domain::catalog::{Make, Model, VehicleType};
use crate::domain::listing::{Advertisement, Favorite, SavedSearch};
use crate::domain::user::User;
use crate::domain::vehicle::{Vehicle, VehicleImage};

macro_rules! header_access {
    () => {
        fn header(&self) -> &AuditHeader {
            &self.header
        }
    };
}

impl Entity for Make {
    const TABLE: &'static str = "makes";
    const COLUMNS: &'static [&'static str] = &["name", "logo_url", "country", "external_taxonomy_id"];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Make {
            header: header_from_row(row)?,
            name: row.get("name")?,
            logo_url: row.get("logo_url")?,
            country: row.get("country")?,
            external_taxonomy_id: row.get("external_taxonomy_id")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![self.name, self.logo_url, self.country, self.external_taxonomy_id])
    }
}

impl Entity for Model {
    const TABLE: &'static str = "models";
    const COLUMNS: &'static [&'static str] = &["make_id", "name", "year_from", "year_to"];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Model {
            header: header_from_row(row)?,
            make_id: row.get("make_id")?,
            name: row.get("name")?,
            year_from: row.get("year_from")?,
            year_to: row.get("year_to")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![self.make_id, self.name, self.year_from, self.year_to])
    }
}

impl Entity for VehicleType {
    const TABLE: &'static str = "vehicle_types";
    const COLUMNS: &'static [&'static str] = &["name", "external_type_id", "description"];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(VehicleType {
            header: header_from_row(row)?,
            name: row.get("name")?,
            external_type_id: row.get("external_type_id")?,
            description: row.get("description")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![self.name, self.external_type_id, self.description])
    }
}

impl Entity for Vehicle {
    const TABLE: &'static str = "vehicles";
    const COLUMNS: &'static [&'static str] = &[
        "make_id",
        "model_id",
        "vehicle_type_id",
        "year",
        "mileage",
        "price",
        "vin",
        "fuel_type",
        "transmission_type",
        "body_style",
        "condition",
        "engine_size",
        "horse_power",
        "cylinders",
        "color",
        "interior_color",
        "doors",
        "seats",
        "city",
        "region",
        "country",
        "description",
        "features",
    ];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Vehicle {
            header: header_from_row(row)?,
            make_id: row.get("make_id")?,
            model_id: row.get("model_id")?,
            vehicle_type_id: row.get("vehicle_type_id")?,
            year: row.get("year")?,
            mileage: row.get("mileage")?,
            price: row.get("price")?,
            vin: row.get("vin")?,
            fuel_type: row.get("fuel_type")?,
            transmission_type: row.get("transmission_type")?,
            body_style: row.get("body_style")?,
            condition: row.get("condition")?,
            engine_size: row.get("engine_size")?,
            horse_power: row.get("horse_power")?,
            cylinders: row.get("cylinders")?,
            color: row.get("color")?,
            interior_color: row.get("interior_color")?,
            doors: row.get("doors")?,
            seats: row.get("seats")?,
            city: row.get("city")?,
            region: row.get("region")?,
            country: row.get("country")?,
            description: row.get("description")?,
            features: row.get("features")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![
            self.make_id,
            self.model_id,
            self.vehicle_type_id,
            self.year,
            self.mileage,
            self.price,
            self.vin,
            self.fuel_type,
            self.transmission_type,
            self.body_style,
            self.condition,
            self.engine_size,
            self.horse_power,
            self.cylinders,
            self.color,
            self.interior_color,
            self.doors,
            self.seats,
            self.city,
            self.region,
            self.country,
            self.description,
            self.features,
        ])
    }
}

impl Entity for VehicleImage {
    const TABLE: &'static str = "vehicle_images";
    const COLUMNS: &'static [&'static str] =
        &["vehicle_id", "image_url", "is_main", "display_order", "caption"];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(VehicleImage {
            header: header_from_row(row)?,
            vehicle_id: row.get("vehicle_id")?,
            image_url: row.get("image_url")?,
            is_main: row.get("is_main")?,
            display_order: row.get("display_order")?,
            caption: row.get("caption")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![
            self.vehicle_id,
            self.image_url,
            self.is_main,
            self.display_order,
            self.caption,
        ])
    }
}

impl Entity for Advertisement {
    const TABLE: &'static str = "advertisements";
    const COLUMNS: &'static [&'static str] = &[
        "vehicle_id",
        "user_id",
        "title",
        "description",
        "price",
        "is_negotiable",
        "status",
        "is_featured",
        "featured_until",
        "published_at",
        "expires_at",
        "view_count",
        "contact_count",
        "favorite_count",
        "contact_phone",
        "video_url",
        "rejection_reason",
    ];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Advertisement {
            header: header_from_row(row)?,
            vehicle_id: row.get("vehicle_id")?,
            user_id: row.get("user_id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            price: row.get("price")?,
            is_negotiable: row.get("is_negotiable")?,
            status: row.get("status")?,
            is_featured: row.get("is_featured")?,
            featured_until: row.get("featured_until")?,
            published_at: row.get("published_at")?,
            expires_at: row.get("expires_at")?,
            view_count: row.get("view_count")?,
            contact_count: row.get("contact_count")?,
            favorite_count: row.get("favorite_count")?,
            contact_phone: row.get("contact_phone")?,
            video_url: row.get("video_url")?,
            rejection_reason: row.get("rejection_reason")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![
            self.vehicle_id,
            self.user_id,
            self.title,
            self.description,
            self.price,
            self.is_negotiable,
            self.status,
            self.is_featured,
            self.featured_until,
            self.published_at,
            self.expires_at,
            self.view_count,
            self.contact_count,
            self.favorite_count,
            self.contact_phone,
            self.video_url,
            self.rejection_reason,
        ])
    }
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "username",
        "email",
        "phone_number",
        "first_name",
        "last_name",
        "user_type",
        "city",
        "region",
        "country",
        "dealership_name",
        "dealership_address",
        "website",
        "profile_image_url",
        "bio",
        "is_active",
        "last_login_at",
    ];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            header: header_from_row(row)?,
            username: row.get("username")?,
            email: row.get("email")?,
            phone_number: row.get("phone_number")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            user_type: row.get("user_type")?,
            city: row.get("city")?,
            region: row.get("region")?,
            country: row.get("country")?,
            dealership_name: row.get("dealership_name")?,
            dealership_address: row.get("dealership_address")?,
            website: row.get("website")?,
            profile_image_url: row.get("profile_image_url")?,
            bio: row.get("bio")?,
            is_active: row.get("is_active")?,
            last_login_at: row.get("last_login_at")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![
            self.username,
            self.email,
            self.phone_number,
            self.first_name,
            self.last_name,
            self.user_type,
            self.city,
            self.region,
            self.country,
            self.dealership_name,
            self.dealership_address,
            self.website,
            self.profile_image_url,
            self.bio,
            self.is_active,
            self.last_login_at,
        ])
    }
}

impl Entity for Favorite {
    const TABLE: &'static str = "favorites";
    const COLUMNS: &'static [&'static str] = &["user_id", "advertisement_id", "notes"];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Favorite {
            header: header_from_row(row)?,
            user_id: row.get("user_id")?,
            advertisement_id: row.get("advertisement_id")?,
            notes: row.get("notes")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![self.user_id, self.advertisement_id, self.notes])
    }
}

impl Entity for SavedSearch {
    const TABLE: &'static str = "saved_searches";
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "name",
        "search_criteria",
        "enable_email_notifications",
        "notification_frequency_hours",
        "last_notified_at",
    ];

    header_access!();

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SavedSearch {
            header: header_from_row(row)?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            search_criteria: row.get("search_criteria")?,
            enable_email_notifications: row.get("enable_email_notifications")?,
            notification_frequency_hours: row.get("notification_frequency_hours")?,
            last_notified_at: row.get("last_notified_at")?,
        })
    }

    fn values(&self) -> rusqlite::Result<Vec<Value>> {
        Ok(sql_values![
            self.user_id,
            self.name,
            self.search_criteria,
            self.enable_email_notifications,
            self.notification_frequency_hours,
            self.last_notified_at,
        ])
    }
}

impl SoftDeletable for Make {}
impl SoftDeletable for Model {}
impl SoftDeletable for VehicleType {}
impl SoftDeletable for Vehicle {}
impl SoftDeletable for VehicleImage {}
impl SoftDeletable for Advertisement {}
impl SoftDeletable for User {}
impl SoftDeletable for Favorite {}
impl SoftDeletable for SavedSearch {}
