//! Keyword search over the adventure catalog.
//!
//! A keyword is checked against an ordered list of [`KeywordRule`]s and the
//! first rule whose [`Trigger`] fires decides the result. The list is:
//!
//! 1. blank keyword: everything
//! 2. raw keyword contains `all`: everything
//! 3. one rule per handle-set collection (raw keyword contains its handle):
//!    that collection's members, in listed order
//! 4. normalized keyword contains `winter`, `summer` or `europe`: titles
//!    containing one of the season or region words
//! 5. anything else: title or description contains the normalized keyword
//!
//! The normalized keyword is the part before the first `-`, lower-cased, so
//! `winter-collection` and `Winter` select the same products.

use wknd_core::{CollectionConfig, Product, StorefrontConfig};

const WINTER_WORDS: &[&str] = &["ski", "winter"];

const SUMMER_WORDS: &[&str] = &[
    "surf",
    "climbing",
    "summer",
    "hiking",
    "camping",
    "rafting",
    "tasting",
    "cycling",
    "gastro",
    "backpacking",
];

const EUROPE_WORDS: &[&str] = &["tuscany", "marais", "basel", "mont"];

/// When a rule applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Keyword absent or empty.
    Blank,
    /// Raw keyword contains the text (case-sensitive).
    Raw(String),
    /// Normalized keyword contains the text.
    Normalized(String),
    /// Fallback; matches any keyword.
    Always,
}

/// Which products a rule returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Everything,
    /// Products with these handles, in this order.
    Handles(Vec<String>),
    /// Products whose lower-cased title contains any of the words.
    TitleContainsAny(Vec<String>),
    /// Products whose lower-cased title or description contains the
    /// normalized keyword.
    TitleOrDescription,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub name: String,
    pub trigger: Trigger,
    pub selection: Selection,
}

impl KeywordRule {
    fn new(name: impl Into<String>, trigger: Trigger, selection: Selection) -> Self {
        Self {
            name: name.into(),
            trigger,
            selection,
        }
    }

    fn fires(&self, raw: Option<&str>, normalized: &str) -> bool {
        match &self.trigger {
            Trigger::Blank => raw.is_none_or(str::is_empty),
            Trigger::Raw(needle) => raw.is_some_and(|k| k.contains(needle.as_str())),
            Trigger::Normalized(needle) => normalized.contains(needle.as_str()),
            Trigger::Always => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordFilter {
    rules: Vec<KeywordRule>,
}

impl KeywordFilter {
    /// Builds the rule list, adding one membership rule per handle-set
    /// collection in the given order.
    pub fn new<'a>(handle_sets: impl IntoIterator<Item = &'a CollectionConfig>) -> Self {
        let mut rules = vec![
            KeywordRule::new("blank", Trigger::Blank, Selection::Everything),
            KeywordRule::new("all", Trigger::Raw("all".to_owned()), Selection::Everything),
        ];

        for collection in handle_sets {
            let Some(handles) = &collection.products else {
                continue;
            };
            rules.push(KeywordRule::new(
                collection.handle.clone(),
                Trigger::Raw(collection.handle.clone()),
                Selection::Handles(handles.clone()),
            ));
        }

        for (name, words) in [
            ("winter", WINTER_WORDS),
            ("summer", SUMMER_WORDS),
            ("europe", EUROPE_WORDS),
        ] {
            rules.push(KeywordRule::new(
                name,
                Trigger::Normalized(name.to_owned()),
                Selection::TitleContainsAny(words.iter().map(|w| (*w).to_owned()).collect()),
            ));
        }

        rules.push(KeywordRule::new(
            "text",
            Trigger::Always,
            Selection::TitleOrDescription,
        ));

        Self { rules }
    }

    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(config.handle_sets())
    }

    #[must_use]
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// The first rule that fires for `keyword`.
    #[must_use]
    pub fn resolve(&self, keyword: Option<&str>) -> Option<&KeywordRule> {
        let normalized = keyword.map(normalize_keyword).unwrap_or_default();
        self.rules.iter().find(|r| r.fires(keyword, &normalized))
    }

    /// Products selected by `keyword`, in catalog order except for handle-set
    /// rules, which keep the configured order.
    #[must_use]
    pub fn apply(&self, keyword: Option<&str>, products: &[Product]) -> Vec<Product> {
        let Some(rule) = self.resolve(keyword) else {
            return Vec::new();
        };
        tracing::debug!(keyword, rule = %rule.name, "resolved keyword rule");

        match &rule.selection {
            Selection::Everything => products.to_vec(),
            Selection::Handles(handles) => handles
                .iter()
                .filter_map(|handle| {
                    let found = products.iter().find(|p| &p.handle == handle);
                    if found.is_none() {
                        tracing::debug!(
                            collection = %rule.name,
                            handle,
                            "collection member not in catalog, skipping"
                        );
                    }
                    found.cloned()
                })
                .collect(),
            Selection::TitleContainsAny(words) => products
                .iter()
                .filter(|p| {
                    let title = p.title.to_lowercase();
                    words.iter().any(|w| title.contains(w.as_str()))
                })
                .cloned()
                .collect(),
            Selection::TitleOrDescription => {
                let needle = keyword.map(normalize_keyword).unwrap_or_default();
                products
                    .iter()
                    .filter(|p| {
                        p.title.to_lowercase().contains(&needle)
                            || p.description.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect()
            }
        }
    }
}

/// Keeps the part of `keyword` before the first `-`, lower-cased.
#[must_use]
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split('-')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

#[cfg(test)]
#[path = "keyword_test.rs"]
mod tests;
