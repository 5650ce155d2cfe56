use std::env;

use crate::errors::AppError;

/// Day counts used by the listing workflows.
#[derive(Debug, Clone, Copy)]
pub struct ListingConfig {
    /// How long a freshly published advertisement stays up.
    pub listing_ttl_days: i64,
    /// Window for the "new advertisements" statistic.
    pub recent_window_days: i64,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            listing_ttl_days: 60,
            recent_window_days: 7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub log_level: String,
    pub listing: ListingConfig,
    pub seed_catalog: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = ListingConfig::default();

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "topdrivex.sqlite3".to_string());
        if database_path.trim().is_empty() {
            return Err(AppError::Config("DATABASE_PATH is empty".into()));
        }

        Ok(AppConfig {
            database_path,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            listing: ListingConfig {
                listing_ttl_days: env::var("LISTING_TTL_DAYS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|days: &i64| *days > 0)
                    .unwrap_or(defaults.listing_ttl_days),
                recent_window_days: env::var("RECENT_WINDOW_DAYS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|days: &i64| *days > 0)
                    .unwrap_or(defaults.recent_window_days),
            },
            seed_catalog: env::var("SEED_CATALOG")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        })
    }
}
