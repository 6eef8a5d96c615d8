//! The commerce-style API the page renderer talks to.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wknd_core::{
    AppConfig, Cart, Collection, CollectionConfig, Menu, Page, PageConfig, Product, Seo,
    StorefrontConfig,
};

use crate::cart::{reshape_cart, static_cart, CartLineInput, CartLineUpdate};
use crate::catalog::Catalog;
use crate::error::StorefrontError;
use crate::keyword::KeywordFilter;
use crate::source::AdventureSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Catalog order, or configured order for handle-set collections.
    #[default]
    Relevance,
    Title,
    /// Base price, lowest first.
    Price,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            other => Err(format!(
                "unknown sort key '{other}' (expected relevance, title or price)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub query: Option<String>,
    pub sort_key: SortKey,
    pub reverse: bool,
}

/// Maps the catalog, the storefront configuration and the mock cart onto
/// product, collection, cart, menu and page lookups.
pub struct Storefront<S> {
    catalog: Catalog<S>,
    config: StorefrontConfig,
    loaded_at: DateTime<Utc>,
}

impl<S: AdventureSource> Storefront<S> {
    #[must_use]
    pub fn new(catalog: Catalog<S>, config: StorefrontConfig) -> Self {
        Self {
            catalog,
            config,
            loaded_at: Utc::now(),
        }
    }

    /// Builds the catalog from `source` using the asset host and revalidation
    /// window from `app`, with keyword rules derived from `config`.
    pub fn from_app_config(source: S, config: StorefrontConfig, app: &AppConfig) -> Self {
        let catalog = Catalog::new(
            source,
            app.asset_host.clone(),
            Duration::from_secs(app.catalog_revalidate_secs),
            KeywordFilter::from_config(&config),
        );
        Self::new(catalog, config)
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// # Errors
    ///
    /// Returns `StorefrontError` if the catalog cannot be loaded.
    pub async fn get_product(&self, handle: &str) -> Result<Option<Product>, StorefrontError> {
        self.catalog.get_by_handle(handle).await
    }

    /// Products matching `query.query`, sorted as requested.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if the catalog cannot be loaded.
    pub async fn get_products(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<Product>, StorefrontError> {
        let products = self.catalog.get_by_keyword(query.query.as_deref()).await?;
        Ok(sort_products(products, query.sort_key, query.reverse))
    }

    /// Products of the collection `handle`, selected by using the handle as
    /// the search keyword.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if the catalog cannot be loaded.
    pub async fn get_collection_products(
        &self,
        handle: &str,
        sort_key: SortKey,
        reverse: bool,
    ) -> Result<Vec<Product>, StorefrontError> {
        let products = self.catalog.get_by_keyword(Some(handle)).await?;
        Ok(sort_products(products, sort_key, reverse))
    }

    /// A configured collection, hidden ones included.
    #[must_use]
    pub fn get_collection(&self, handle: &str) -> Option<Collection> {
        self.config
            .collections
            .iter()
            .find(|c| c.handle == handle)
            .map(|c| self.collection(c))
    }

    /// The synthetic "All" collection followed by every collection that is
    /// not hidden.
    #[must_use]
    pub fn get_collections(&self) -> Vec<Collection> {
        let all = Collection {
            handle: String::new(),
            title: "All".to_owned(),
            description: "All products".to_owned(),
            seo: Seo {
                title: "All".to_owned(),
                description: "All products".to_owned(),
            },
            path: Collection::search_path(""),
            updated_at: self.loaded_at,
        };

        std::iter::once(all)
            .chain(
                self.config
                    .collections
                    .iter()
                    .map(|c| self.collection(c))
                    .filter(|c| !c.is_hidden()),
            )
            .collect()
    }

    /// The configured recommendation list. The same products are offered for
    /// every product; handles missing from the catalog are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if the catalog cannot be loaded.
    pub async fn get_product_recommendations(
        &self,
        product_id: &str,
    ) -> Result<Vec<Product>, StorefrontError> {
        let products = self.catalog.list_all().await?;
        let recommended: Vec<Product> = self
            .config
            .recommendations
            .iter()
            .filter_map(|handle| products.iter().find(|p| &p.handle == handle).cloned())
            .collect();
        tracing::debug!(
            product_id,
            count = recommended.len(),
            "resolved recommendations"
        );
        Ok(recommended)
    }

    /// # Errors
    ///
    /// Returns [`StorefrontError::EmptyCatalog`] when there is no product to
    /// put in the cart, or any catalog load error.
    pub async fn create_cart(&self) -> Result<Cart, StorefrontError> {
        self.mock_cart().await
    }

    /// # Errors
    ///
    /// Same as [`Self::create_cart`].
    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart, StorefrontError> {
        tracing::debug!(cart_id, "get cart");
        self.mock_cart().await
    }

    /// # Errors
    ///
    /// Same as [`Self::create_cart`].
    pub async fn add_to_cart(
        &self,
        cart_id: &str,
        lines: &[CartLineInput],
    ) -> Result<Cart, StorefrontError> {
        tracing::debug!(cart_id, lines = lines.len(), "add to cart");
        self.mock_cart().await
    }

    /// # Errors
    ///
    /// Same as [`Self::create_cart`].
    pub async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<Cart, StorefrontError> {
        tracing::debug!(cart_id, lines = line_ids.len(), "remove from cart");
        self.mock_cart().await
    }

    /// # Errors
    ///
    /// Same as [`Self::create_cart`].
    pub async fn update_cart(
        &self,
        cart_id: &str,
        lines: &[CartLineUpdate],
    ) -> Result<Cart, StorefrontError> {
        tracing::debug!(cart_id, lines = lines.len(), "update cart");
        self.mock_cart().await
    }

    /// Main navigation. Every handle gets the same menu.
    #[must_use]
    pub fn get_menu(&self, _handle: &str) -> Vec<Menu> {
        self.config.menus.main.clone()
    }

    /// Footer navigation. Every handle gets the same menu.
    #[must_use]
    pub fn get_footer_menu(&self, _handle: &str) -> Vec<Menu> {
        self.config.menus.footer.clone()
    }

    #[must_use]
    pub fn get_page(&self, handle: &str) -> Option<Page> {
        self.config
            .pages
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| self.page(p))
    }

    #[must_use]
    pub fn get_pages(&self) -> Vec<Page> {
        self.config.pages.iter().map(|p| self.page(p)).collect()
    }

    async fn mock_cart(&self) -> Result<Cart, StorefrontError> {
        let products = self.catalog.list_all().await?;
        let product = products.first().cloned().ok_or(StorefrontError::EmptyCatalog)?;
        Ok(reshape_cart(static_cart(product)))
    }

    fn collection(&self, config: &CollectionConfig) -> Collection {
        Collection {
            handle: config.handle.clone(),
            title: config.title.clone(),
            description: config.description.clone(),
            seo: Seo {
                title: config.title.clone(),
                description: config.description.clone(),
            },
            path: Collection::search_path(&config.handle),
            updated_at: self.loaded_at,
        }
    }

    fn page(&self, config: &PageConfig) -> Page {
        Page {
            id: format!("page-{}", config.handle),
            title: config.title.clone(),
            handle: config.handle.clone(),
            body: config.body.clone(),
            body_summary: config.body_summary.clone(),
            seo: config.seo.clone(),
            created_at: config.created_at.unwrap_or(self.loaded_at),
            updated_at: config.updated_at.unwrap_or(self.loaded_at),
        }
    }
}

fn sort_products(mut products: Vec<Product>, sort_key: SortKey, reverse: bool) -> Vec<Product> {
    match sort_key {
        SortKey::Relevance => {}
        SortKey::Title => products.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Price => products.sort_by_key(Product::min_price),
    }
    if reverse {
        products.reverse();
    }
    products
}

#[cfg(test)]
#[path = "storefront_test.rs"]
mod tests;
