pub mod advertisements;
pub mod catalog;
pub mod engagement;
pub mod listings;
pub mod loader;
pub mod moderation;
pub mod stats;

pub use advertisements::AdvertisementService;
pub use catalog::CatalogService;
pub use listings::ListingService;
pub use loader::ListingLoader;
pub use stats::StatsService;
