//! Command handlers. Each prints pretty JSON to stdout.

use std::path::Path;

use serde::Serialize;
use wknd_core::{AppConfig, StorefrontConfig};
use wknd_storefront::{ContentSource, ProductQuery, SortKey, Storefront};

/// Picks the storefront file: an explicit `--storefront` path, then the
/// configured path if it exists, then the bundled configuration.
pub(crate) fn load_storefront_config(
    explicit: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<StorefrontConfig> {
    if let Some(path) = explicit {
        return Ok(wknd_core::load_storefront_config(path)?);
    }
    if config.storefront_path.exists() {
        return Ok(wknd_core::load_storefront_config(&config.storefront_path)?);
    }
    tracing::debug!(
        path = %config.storefront_path.display(),
        "storefront file not found, using bundled configuration"
    );
    Ok(wknd_core::builtin_storefront_config()?)
}

pub(crate) fn build_storefront(
    config: &AppConfig,
    storefront_path: Option<&Path>,
) -> anyhow::Result<Storefront<ContentSource>> {
    let storefront_config = load_storefront_config(storefront_path, config)?;
    let source = ContentSource::from_app_config(config)?;
    Ok(Storefront::from_app_config(source, storefront_config, config))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_products(
    storefront: &Storefront<ContentSource>,
    query: Option<String>,
    sort_key: SortKey,
    reverse: bool,
) -> anyhow::Result<()> {
    let products = storefront
        .get_products(&ProductQuery {
            query,
            sort_key,
            reverse,
        })
        .await?;
    tracing::info!(count = products.len(), "products listed");
    print_json(&products)
}

pub(crate) async fn run_product(
    storefront: &Storefront<ContentSource>,
    handle: &str,
) -> anyhow::Result<()> {
    let Some(product) = storefront.get_product(handle).await? else {
        anyhow::bail!("product '{handle}' not found");
    };
    print_json(&product)
}

pub(crate) fn run_collections(storefront: &Storefront<ContentSource>) -> anyhow::Result<()> {
    print_json(&storefront.get_collections())
}

pub(crate) async fn run_cart(storefront: &Storefront<ContentSource>) -> anyhow::Result<()> {
    let cart = storefront.create_cart().await?;
    print_json(&cart)
}
