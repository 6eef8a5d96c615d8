//! Non-product storefront content: collections, navigation menus and pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::products::Seo;

/// A browsable group of products, addressed by `handle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub handle: String,
    pub title: String,
    pub description: String,
    pub seo: Seo,
    /// Search route for the collection, always `"/search/{handle}"`.
    pub path: String,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    #[must_use]
    pub fn search_path(handle: &str) -> String {
        format!("/search/{handle}")
    }

    /// Collections whose handle starts with `hidden` back homepage widgets and
    /// are never listed on the search page.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.handle.starts_with("hidden")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub body: String,
    pub body_summary: String,
    pub seo: Option<Seo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
