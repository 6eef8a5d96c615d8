//! Mapping from raw [`AdventureRecord`]s to storefront [`Product`]s.
//!
//! Every adventure is sold in the same nine configurations: a group size
//! (`Small`, `Normal`, `Large`) crossed with a stay duration (`Short`,
//! `Normal`, `Extended Stay`). Each axis adds a fixed amount to the base
//! price. A tenth variant, priced at the unadjusted base, carries the record's
//! own path as its id and duplicates the `Normal / Normal` selection; it is
//! what the storefront selects when the visitor has not picked any options.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use wknd_core::{
    Image, Money, PriceRange, Product, ProductOption, ProductVariant, SelectedOption, Seo,
};

use crate::error::TransformError;
use crate::types::AdventureRecord;

pub const GROUP_SIZE_OPTION: &str = "Group Size";
pub const STAY_DURATION_OPTION: &str = "Stay Duration";

const GROUP_SIZE_VALUES: [&str; 3] = ["Small", "Normal", "Large"];
const DURATION_VALUES: [&str; 3] = ["Short", "Normal", "Extended Stay"];

/// Price delta for a group size, in whole currency units.
fn group_size_adjustment(group_size: &str) -> Decimal {
    match group_size {
        "Small" => Decimal::from(-100),
        "Large" => Decimal::from(600),
        _ => Decimal::ZERO,
    }
}

/// Price delta for a stay duration, in whole currency units.
fn duration_adjustment(duration: &str) -> Decimal {
    match duration {
        "Short" => Decimal::from(-100),
        "Extended Stay" => Decimal::from(700),
        _ => Decimal::ZERO,
    }
}

/// Converts one adventure record into a storefront product.
///
/// `asset_host` is prepended to the record's image path. `updatedAt` is
/// stamped with the current time.
///
/// # Errors
///
/// - [`TransformError::MissingField`] if the path, title, price, description,
///   itinerary or primary image path is absent.
/// - [`TransformError::InvalidPrice`] if the price is not `"<symbol><amount> <currency>"`
///   with a non-negative amount.
pub fn transform_adventure(
    record: &AdventureRecord,
    asset_host: &str,
) -> Result<Product, TransformError> {
    build_product(record, asset_host, Utc::now())
}

fn build_product(
    record: &AdventureRecord,
    asset_host: &str,
    updated_at: DateTime<Utc>,
) -> Result<Product, TransformError> {
    let path = record.path.as_deref().ok_or(TransformError::MissingField {
        path: "<unknown>".to_owned(),
        field: "_path",
    })?;
    let missing = |field: &'static str| TransformError::MissingField {
        path: path.to_owned(),
        field,
    };

    let title = record.title.as_deref().ok_or_else(|| missing("title"))?;
    let raw_price = record.price.as_deref().ok_or_else(|| missing("price"))?;
    let description = record
        .description
        .as_ref()
        .and_then(|d| d.html.as_deref())
        .ok_or_else(|| missing("description.html"))?;
    let itinerary = record
        .itinerary
        .as_ref()
        .and_then(|i| i.html.as_deref())
        .ok_or_else(|| missing("itinerary.html"))?;
    let image = record
        .primary_image
        .as_ref()
        .ok_or_else(|| missing("primaryImage"))?;
    let image_path = image
        .path
        .as_deref()
        .ok_or_else(|| missing("primaryImage._path"))?;

    let (base, currency) = parse_price(raw_price).ok_or_else(|| TransformError::InvalidPrice {
        path: path.to_owned(),
        price: raw_price.to_owned(),
    })?;
    let base_price = Money::new(base.to_string(), currency.clone());

    let mut variants = Vec::with_capacity(GROUP_SIZE_VALUES.len() * DURATION_VALUES.len() + 1);
    for group_size in GROUP_SIZE_VALUES {
        for duration in DURATION_VALUES {
            let amount = adjusted_amount(
                path,
                base,
                group_size_adjustment(group_size) + duration_adjustment(duration),
            );
            variants.push(ProductVariant {
                id: format!("{path}-{group_size}-{duration}-variant"),
                title: format!("{group_size} / {duration}"),
                available_for_sale: true,
                selected_options: vec![
                    SelectedOption::new(GROUP_SIZE_OPTION, group_size),
                    SelectedOption::new(STAY_DURATION_OPTION, duration),
                ],
                price: Money::from_decimal(amount, currency.clone()),
            });
        }
    }
    variants.push(ProductVariant {
        id: path.to_owned(),
        title: title.to_owned(),
        available_for_sale: true,
        selected_options: vec![
            SelectedOption::new(STAY_DURATION_OPTION, "Normal"),
            SelectedOption::new(GROUP_SIZE_OPTION, "Normal"),
        ],
        price: base_price.clone(),
    });

    let featured_image = Image {
        url: asset_url(asset_host, image_path),
        alt_text: title.to_owned(),
        width: image.width,
        height: image.height,
    };

    Ok(Product {
        id: path.to_owned(),
        handle: handle_from_path(path).to_owned(),
        available_for_sale: true,
        title: title.to_owned(),
        description: description.to_owned(),
        // The itinerary, not the description, is the product's HTML body.
        description_html: itinerary.to_owned(),
        options: vec![
            ProductOption {
                id: "groupSizeProductOption".to_owned(),
                name: GROUP_SIZE_OPTION.to_owned(),
                values: GROUP_SIZE_VALUES.iter().map(|v| (*v).to_owned()).collect(),
            },
            ProductOption {
                id: "durationProductOption".to_owned(),
                name: STAY_DURATION_OPTION.to_owned(),
                values: DURATION_VALUES.iter().map(|v| (*v).to_owned()).collect(),
            },
        ],
        price_range: PriceRange {
            max_variant_price: base_price.clone(),
            min_variant_price: base_price,
        },
        images: vec![featured_image.clone()],
        featured_image,
        seo: Seo {
            title: title.to_owned(),
            description: description.to_owned(),
        },
        tags: Vec::new(),
        variants,
        updated_at,
    })
}

/// Last `/`-separated segment of a repository path.
#[must_use]
pub fn handle_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Splits `"$1,000.50 USD"` into `(1000.50, "USD")`.
///
/// Leading currency symbols and thousands separators are dropped. Returns
/// `None` when the currency is missing, the amount is not a number, or the
/// amount is negative.
pub(crate) fn parse_price(raw: &str) -> Option<(Decimal, String)> {
    let mut parts = raw.split_whitespace();
    let amount_part = parts.next()?;
    let currency = parts.next()?;

    let digits: String = amount_part
        .trim_start_matches(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let amount = digits.parse::<Decimal>().ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    Some((amount, currency.to_owned()))
}

/// Applies `adjustment` to `base`, flooring at zero so prices stay non-negative.
fn adjusted_amount(path: &str, base: Decimal, adjustment: Decimal) -> Decimal {
    let amount = base + adjustment;
    if amount.is_sign_negative() {
        tracing::warn!(
            path,
            base = %base,
            adjustment = %adjustment,
            "variant price below zero, clamping to 0"
        );
        return Decimal::ZERO;
    }
    amount
}

fn asset_url(host: &str, path: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
