//! Storefront content that does not come from the content repository:
//! collections, navigation menus, static pages and recommendations.
//!
//! Loaded from a YAML file (see `config/storefront.yaml`).

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::Menu;
use crate::products::Seo;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Explicit member handles, in display order. Collections with a product
    /// list are resolved by membership instead of by keyword matching.
    #[serde(default)]
    pub products: Option<Vec<String>>,
}

impl CollectionConfig {
    #[must_use]
    pub fn is_handle_set(&self) -> bool {
        self.products.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenusConfig {
    #[serde(default)]
    pub main: Vec<Menu>,
    #[serde(default)]
    pub footer: Vec<Menu>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_summary: String,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
    #[serde(default)]
    pub menus: MenusConfig,
    #[serde(default)]
    pub pages: Vec<PageConfig>,
    /// Handles offered as recommendations on every product page.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl StorefrontConfig {
    /// Collections defined by an explicit handle list, in file order.
    pub fn handle_sets(&self) -> impl Iterator<Item = &CollectionConfig> {
        self.collections.iter().filter(|c| c.is_handle_set())
    }
}

/// The WKND storefront content bundled with the crate
/// (`config/storefront.yaml`), for callers running without a file on disk.
///
/// # Errors
///
/// Returns `ConfigError` only if the bundled file fails to parse or validate.
pub fn builtin_storefront_config() -> Result<StorefrontConfig, ConfigError> {
    parse_storefront_config(BUILTIN_STOREFRONT_YAML)
}

const BUILTIN_STOREFRONT_YAML: &str = include_str!("../../../config/storefront.yaml");

/// Load and validate the storefront configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_storefront_config(path: &Path) -> Result<StorefrontConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StorefrontFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_storefront_config(&content)
}

/// Parse and validate storefront configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML does not parse or fails validation.
pub fn parse_storefront_config(content: &str) -> Result<StorefrontConfig, ConfigError> {
    let config: StorefrontConfig = serde_yaml::from_str(content)?;
    validate_storefront(&config)?;
    Ok(config)
}

fn validate_storefront(config: &StorefrontConfig) -> Result<(), ConfigError> {
    let mut seen_collections = HashSet::new();
    for collection in &config.collections {
        if collection.handle.trim().is_empty() {
            return Err(ConfigError::Validation(
                "collection handle must be non-empty (the empty handle is the built-in \"All\" collection)"
                    .to_string(),
            ));
        }
        if collection.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "collection '{}' has an empty title",
                collection.handle
            )));
        }
        // The `all` keyword rule runs before handle-set rules and would shadow it.
        if collection.is_handle_set() && collection.handle.contains("all") {
            return Err(ConfigError::Validation(format!(
                "handle-set collection '{}' must not contain \"all\"",
                collection.handle
            )));
        }
        if !seen_collections.insert(collection.handle.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate collection handle: '{}'",
                collection.handle
            )));
        }
    }

    let mut seen_pages = HashSet::new();
    for page in &config.pages {
        if page.handle.trim().is_empty() || page.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "page handle and title must be non-empty".to_string(),
            ));
        }
        if !seen_pages.insert(page.handle.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate page handle: '{}'",
                page.handle
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "storefront_config_test.rs"]
mod tests;
