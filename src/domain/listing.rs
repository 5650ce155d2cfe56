// src/domain/listing.rs

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::audit::AuditHeader;
use crate::domain::enums::AdvertisementStatus;

/// The public listing wrapping exactly one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement {
    pub header: AuditHeader,

    pub vehicle_id: Uuid,
    pub user_id: Uuid,

    pub title: String,
    pub description: String,
    pub price: f64,
    pub is_negotiable: bool,

    pub status: AdvertisementStatus,
    pub is_featured: bool,
    pub featured_until: Option<DateTime<Utc>>,

    pub published_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    // Counters only ever grow.
    pub view_count: i64,
    pub contact_count: i64,
    pub favorite_count: i64,

    pub contact_phone: Option<String>,
    pub video_url: Option<String>,
    pub rejection_reason: Option<String>,
}

impl Advertisement {
    /// An active listing published now and expiring after `ttl_days`.
    pub fn publish(
        vehicle_id: Uuid,
        user_id: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        ttl_days: i64,
    ) -> Self {
        let header = AuditHeader::new();
        let now = header.created_at;
        Self {
            header,
            vehicle_id,
            user_id,
            title: title.into(),
            description: description.into(),
            price,
            is_negotiable: false,
            status: AdvertisementStatus::Active,
            is_featured: false,
            featured_until: None,
            published_at: now,
            expires_at: now + Duration::days(ttl_days),
            view_count: 0,
            contact_count: 0,
            favorite_count: 0,
            contact_phone: None,
            video_url: None,
            rejection_reason: None,
        }
    }
}

/// A user's bookmark on an advertisement; one per `(user_id, advertisement_id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub header: AuditHeader,
    pub user_id: Uuid,
    pub advertisement_id: Uuid,
    pub notes: Option<String>,
}

impl Favorite {
    pub fn new(user_id: Uuid, advertisement_id: Uuid, notes: Option<String>) -> Self {
        Self {
            header: AuditHeader::new(),
            user_id,
            advertisement_id,
            notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedSearch {
    pub header: AuditHeader,
    pub user_id: Uuid,
    pub name: String,
    /// Serialized `SearchCriteria`.
    pub search_criteria: String,
    pub enable_email_notifications: bool,
    pub notification_frequency_hours: i32,
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl SavedSearch {
    pub fn new(user_id: Uuid, name: impl Into<String>, search_criteria: String) -> Self {
        Self {
            header: AuditHeader::new(),
            user_id,
            name: name.into(),
            search_criteria,
            enable_email_notifications: true,
            notification_frequency_hours: 24,
            last_notified_at: None,
        }
    }
}
