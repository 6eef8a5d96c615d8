//! The mock cart returned by every cart operation.
//!
//! Nothing is persisted: creating, reading and editing a cart all answer with
//! the same single-line cart built around the first catalog product.

use serde::{Deserialize, Serialize};
use wknd_core::{
    Cart, CartCost, CartItem, CartItemCost, Merchandise, Money, Product, SelectedOption,
};

/// A cart as a commerce backend would return it, before the tax amount has
/// been filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCart {
    pub id: String,
    pub checkout_url: String,
    pub cost: RawCartCost,
    pub lines: Vec<CartItem>,
    pub total_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    pub total_tax_amount: Option<Money>,
}

/// A line to add: which variant, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// A change to an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdate {
    pub id: String,
    pub merchandise_id: String,
    pub quantity: u32,
}

/// Fills in a missing tax amount with `0.0 USD`. Every other field is carried
/// over unchanged.
#[must_use]
pub fn reshape_cart(raw: RawCart) -> Cart {
    let total_tax_amount = raw
        .cost
        .total_tax_amount
        .unwrap_or_else(|| Money::new("0.0", "USD"));

    Cart {
        id: raw.id,
        checkout_url: raw.checkout_url,
        cost: CartCost {
            subtotal_amount: raw.cost.subtotal_amount,
            total_amount: raw.cost.total_amount,
            total_tax_amount,
        },
        lines: raw.lines,
        total_quantity: raw.total_quantity,
    }
}

/// The fixed cart: one line holding `product`.
#[must_use]
pub fn static_cart(product: Product) -> RawCart {
    RawCart {
        id: "cart1".to_owned(),
        checkout_url: "https://example.com/checkout".to_owned(),
        cost: RawCartCost {
            subtotal_amount: Money::new("90.00", "USD"),
            total_amount: Money::new("100.00", "USD"),
            total_tax_amount: Some(Money::new("10.00", "USD")),
        },
        lines: vec![CartItem {
            id: "item1".to_owned(),
            quantity: 1,
            cost: CartItemCost {
                total_amount: Money::new("100.00", "USD"),
            },
            merchandise: Merchandise {
                id: "merchandise1".to_owned(),
                title: "WKND Adventure".to_owned(),
                selected_options: vec![SelectedOption::new("Duration", "Normal")],
                product,
            },
        }],
        total_quantity: 1,
    }
}
