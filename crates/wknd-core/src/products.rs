use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount as the storefront renders it.
///
/// `amount` is kept as a decimal string (e.g. `"1000"`, `"12.99"`), exactly as
/// the content repository formats it. Arithmetic goes through [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: String,
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency_code: String,
}

impl Money {
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Builds a `Money` from a decimal value. The decimal's scale is kept, so
    /// `900.00` stays `"900.00"` and `900` stays `"900"`.
    #[must_use]
    pub fn from_decimal(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self::new(amount.to_string(), currency_code)
    }

    /// Parses `amount` back into a [`Decimal`]. Returns `None` when the string
    /// is not a decimal number.
    #[must_use]
    pub fn decimal(&self) -> Option<Decimal> {
        self.amount.parse::<Decimal>().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One purchasable configuration of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub selected_options: Vec<SelectedOption>,
    pub price: Money,
}

impl ProductVariant {
    /// Returns the value selected for option `name`, if any.
    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    pub alt_text: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub max_variant_price: Money,
    pub min_variant_price: Money,
}

/// A storefront product built from one adventure record.
///
/// `id` is the source record's repository path; `handle` is its final path
/// segment. Handles are not guaranteed unique across a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub title: String,
    pub description: String,
    pub description_html: String,
    pub options: Vec<ProductOption>,
    pub price_range: PriceRange,
    pub featured_image: Image,
    pub images: Vec<Image>,
    pub seo: Seo,
    pub tags: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns every variant whose selected options include all of `selected`
    /// (order-insensitive).
    #[must_use]
    pub fn find_variants(&self, selected: &[(&str, &str)]) -> Vec<&ProductVariant> {
        self.variants
            .iter()
            .filter(|v| {
                selected
                    .iter()
                    .all(|(name, value)| v.option_value(name) == Some(*value))
            })
            .collect()
    }

    /// The lower bound of the price range as a decimal, used for price sorting.
    #[must_use]
    pub fn min_price(&self) -> Option<Decimal> {
        self.price_range.min_variant_price.decimal()
    }
}
