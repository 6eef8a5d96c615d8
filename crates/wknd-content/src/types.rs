//! Response types for the content repository's persisted GraphQL queries.
//!
//! ## Observed shape
//!
//! ### Envelope
//! Persisted queries answer with a standard GraphQL envelope:
//! `{"data": {...}, "errors": [...]}`. `errors` is absent on success. A failed
//! query may return `"data": null` together with `errors`.
//!
//! ### `adventures-all`
//! `{"data": {"adventureList": {"items": [ ... ]}}}`. An empty repository
//! answers with `"items": []`; some deployments omit `adventureList` entirely,
//! which we treat the same way.
//!
//! ### `adventure-by-path`
//! `{"data": {"adventureByPath": {"item": { ... }}}}`. An unknown path answers
//! with `"item": null`.
//!
//! ### Record fields
//! Every record field is modelled as optional. Presence of the fields the
//! storefront needs is checked by [`crate::transform`], which reports the
//! first missing one instead of failing the whole listing at parse time.
//! - `_path`: repository path, e.g. `/content/dam/wknd-shared/en/adventures/bali-surf-camp/bali-surf-camp`.
//! - `price`: display string such as `"$5000 USD"`.
//! - `description` / `itinerary`: rich-text objects with an `html` rendition.
//! - `primaryImage`: image reference with its own `_path` and pixel size.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `data` payload of the `adventures-all` query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureListData {
    #[serde(default)]
    pub adventure_list: Option<AdventureList>,
}

#[derive(Debug, Deserialize)]
pub struct AdventureList {
    #[serde(default)]
    pub items: Vec<AdventureRecord>,
}

/// Full response of the `adventures-all` query.
pub type AdventureListResponse = GraphqlResponse<AdventureListData>;

/// `data` payload of the `adventure-by-path` query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureByPathData {
    #[serde(default)]
    pub adventure_by_path: Option<AdventureByPath>,
}

#[derive(Debug, Deserialize)]
pub struct AdventureByPath {
    #[serde(default)]
    pub item: Option<AdventureRecord>,
}

pub type AdventureByPathResponse = GraphqlResponse<AdventureByPathData>;

/// One bookable trip as stored in the content repository.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdventureRecord {
    /// Repository path; unique per record.
    #[serde(rename = "_path", default)]
    pub path: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// Display price, `"<symbol><amount> <currency>"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub description: Option<RichText>,

    /// Day-by-day itinerary.
    #[serde(default)]
    pub itinerary: Option<RichText>,

    #[serde(default)]
    pub primary_image: Option<ImageRef>,
}

/// A multi-format text field; only the HTML rendition is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRef {
    #[serde(rename = "_path", default)]
    pub path: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl AdventureListResponse {
    /// Consumes the envelope and returns its records, or an empty list when
    /// the listing is absent.
    #[must_use]
    pub fn into_items(self) -> Vec<AdventureRecord> {
        self.data
            .and_then(|d| d.adventure_list)
            .map(|l| l.items)
            .unwrap_or_default()
    }
}
