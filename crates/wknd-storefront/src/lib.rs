pub mod cart;
pub mod catalog;
pub mod error;
pub mod keyword;
pub mod source;
pub mod storefront;

pub use cart::{reshape_cart, static_cart, CartLineInput, CartLineUpdate, RawCart, RawCartCost};
pub use catalog::Catalog;
pub use error::StorefrontError;
pub use keyword::{normalize_keyword, KeywordFilter, KeywordRule, Selection, Trigger};
pub use source::{AdventureSource, ContentSource, InMemorySource};
pub use storefront::{ProductQuery, SortKey, Storefront};
