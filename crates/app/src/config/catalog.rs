//! Catalog Config

use clap::Args;
use medstore::money::DEFAULT_CURRENCY;

/// Catalog presentation settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Categories hidden from the category picker
    #[arg(
        long,
        env = "EXCLUDED_CATEGORIES",
        value_delimiter = ',',
        default_value = "SPO2"
    )]
    pub excluded_categories: Vec<String>,

    /// Currency prices are shown in
    #[arg(long, env = "MEDSTORE_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
}
