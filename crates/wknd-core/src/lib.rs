pub mod app_config;
pub mod cart;
pub mod config;
pub mod content;
pub mod products;
pub mod storefront_config;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartCost, CartItem, CartItemCost, Merchandise};
pub use config::{
    load_app_config, load_app_config_from_env, load_app_config_with_overrides, DEFAULT_ASSET_HOST,
};
pub use content::{Collection, Menu, Page};
pub use products::{
    Image, Money, PriceRange, Product, ProductOption, ProductVariant, SelectedOption, Seo,
};
pub use storefront_config::{
    builtin_storefront_config, load_storefront_config, parse_storefront_config, CollectionConfig,
    MenusConfig, PageConfig, StorefrontConfig,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read storefront file {path}: {source}")]
    StorefrontFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse storefront file: {0}")]
    StorefrontFileParse(#[from] serde_yaml::Error),

    #[error("storefront config validation failed: {0}")]
    Validation(String),
}
