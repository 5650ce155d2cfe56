// src/domain/catalog.rs

use uuid::Uuid;

use crate::domain::audit::AuditHeader;

/// A manufacturer. `name` is unique, as is `external_taxonomy_id` when set.
#[derive(Debug, Clone, PartialEq)]
pub struct Make {
    pub header: AuditHeader,
    pub name: String,
    pub logo_url: Option<String>,
    pub country: Option<String>,
    pub external_taxonomy_id: Option<i64>,
}

impl Make {
    pub fn new(name: impl Into<String>, country: Option<&str>) -> Self {
        Self {
            header: AuditHeader::new(),
            name: name.into(),
            logo_url: None,
            country: country.map(str::to_string),
            external_taxonomy_id: None,
        }
    }
}

/// A model line of one make; `(make_id, name)` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub header: AuditHeader,
    pub make_id: Uuid,
    pub name: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

impl Model {
    pub fn new(make_id: Uuid, name: impl Into<String>, year_from: Option<i32>) -> Self {
        Self {
            header: AuditHeader::new(),
            make_id,
            name: name.into(),
            year_from,
            year_to: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleType {
    pub header: AuditHeader,
    pub name: String,
    pub external_type_id: Option<i64>,
    pub description: Option<String>,
}

impl VehicleType {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            header: AuditHeader::new(),
            name: name.into(),
            external_type_id: None,
            description: description.map(str::to_string),
        }
    }
}
