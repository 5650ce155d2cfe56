// src/domain/user.rs

use chrono::{DateTime, Utc};

use crate::domain::audit::AuditHeader;
use crate::domain::enums::UserType;
use crate::domain::vehicle::DEFAULT_COUNTRY;

/// Account profile. Credentials live with the identity provider, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub header: AuditHeader,

    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,

    pub first_name: String,
    pub last_name: String,
    pub user_type: UserType,

    pub city: Option<String>,
    pub region: Option<String>,
    pub country: String,

    // Dealer accounts only.
    pub dealership_name: Option<String>,
    pub dealership_address: Option<String>,
    pub website: Option<String>,

    pub profile_image_url: Option<String>,
    pub bio: Option<String>,

    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            header: AuditHeader::new(),
            username: username.into(),
            email: email.into(),
            phone_number: None,
            first_name: String::new(),
            last_name: String::new(),
            user_type: UserType::Private,
            city: None,
            region: None,
            country: DEFAULT_COUNTRY.to_string(),
            dealership_name: None,
            dealership_address: None,
            website: None,
            profile_image_url: None,
            bio: None,
            is_active: true,
            last_login_at: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
