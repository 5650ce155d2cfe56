use topdrivex::config::AppConfig;
use topdrivex::db::{init_db, Database};
use topdrivex::seed::seed_catalog;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let db = Database::new(&config.database_path);

    if let Err(e) = init_db(&db) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    if config.seed_catalog {
        if let Err(e) = seed_catalog(&db) {
            error!(error = %e, "catalogue seeding failed");
            std::process::exit(1);
        }
    }

    info!(
        path = %db.path().display(),
        listing_ttl_days = config.listing.listing_ttl_days,
        recent_window_days = config.listing.recent_window_days,
        "store ready"
    );
}
