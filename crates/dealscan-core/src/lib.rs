pub mod app_config;
pub mod categories;
pub mod config;
pub mod listings;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use categories::detect_categories;
pub use config::{load_app_config, load_app_config_from_env};
pub use listings::{
    CanonicalListing, ClassifiedListing, ListingFlags, ListingFragments, PercentOff,
    PriceFragment, PromoSource, ScrapedListing, SEASONAL_SALE_LABEL, SPECIAL_SENTINEL,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
