//! The transformed adventure catalog, memoized per process.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use wknd_content::transform_adventure;
use wknd_core::Product;

use crate::error::StorefrontError;
use crate::keyword::KeywordFilter;
use crate::source::AdventureSource;

struct CachedListing {
    fetched_at: Instant,
    products: Arc<Vec<Product>>,
}

/// Product lookups backed by an [`AdventureSource`].
///
/// The full listing is fetched and transformed at most once per revalidation
/// window. The cache lock is held across the fetch, so concurrent callers
/// wait for the one in flight instead of issuing their own. A failed fetch
/// leaves the cache untouched.
pub struct Catalog<S> {
    source: S,
    asset_host: String,
    revalidate: Duration,
    filter: KeywordFilter,
    cache: Mutex<Option<CachedListing>>,
}

impl<S: AdventureSource> Catalog<S> {
    pub fn new(
        source: S,
        asset_host: impl Into<String>,
        revalidate: Duration,
        filter: KeywordFilter,
    ) -> Self {
        Self {
            source,
            asset_host: asset_host.into(),
            revalidate,
            filter,
            cache: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filter(&self) -> &KeywordFilter {
        &self.filter
    }

    /// Every product, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Content`] if the source fails and
    /// [`StorefrontError::Transform`] if any record cannot be transformed.
    pub async fn list_all(&self) -> Result<Arc<Vec<Product>>, StorefrontError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < self.revalidate {
                return Ok(Arc::clone(&cached.products));
            }
        }

        let start = Instant::now();
        let records = self.source.fetch_all().await?;
        let products = records
            .iter()
            .map(|r| transform_adventure(r, &self.asset_host))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            count = products.len(),
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "catalog refreshed"
        );

        let products = Arc::new(products);
        *cache = Some(CachedListing {
            fetched_at: Instant::now(),
            products: Arc::clone(&products),
        });
        Ok(products)
    }

    /// First product whose handle is `handle`, scanning the cached listing.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_all`]. An unknown handle is `Ok(None)`.
    pub async fn get_by_handle(&self, handle: &str) -> Result<Option<Product>, StorefrontError> {
        let products = self.list_all().await?;
        Ok(products.iter().find(|p| p.handle == handle).cloned())
    }

    /// Looks up one record by repository path directly at the source and
    /// transforms it. Bypasses the cache.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Content`] if the source fails and
    /// [`StorefrontError::Transform`] if the record cannot be transformed.
    pub async fn get_by_path(&self, path: &str) -> Result<Option<Product>, StorefrontError> {
        let Some(record) = self.source.fetch_by_path(path).await? else {
            return Ok(None);
        };
        Ok(Some(transform_adventure(&record, &self.asset_host)?))
    }

    /// Products selected by the keyword cascade.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_all`].
    pub async fn get_by_keyword(
        &self,
        keyword: Option<&str>,
    ) -> Result<Vec<Product>, StorefrontError> {
        let products = self.list_all().await?;
        Ok(self.filter.apply(keyword, &products))
    }

    /// Drops the cached listing; the next call fetches again.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
