use wknd_content::{transform_adventure, AdventureListResponse};
use wknd_core::{parse_storefront_config, DEFAULT_ASSET_HOST};

use super::*;

const FIXTURE: &str = include_str!("../../../fixtures/adventures.json");
const SHIPPED: &str = include_str!("../../../config/storefront.yaml");

fn catalog() -> Vec<Product> {
    let response: AdventureListResponse = serde_json::from_str(FIXTURE).expect("fixture");
    response
        .into_items()
        .iter()
        .map(|r| transform_adventure(r, DEFAULT_ASSET_HOST).expect("transform"))
        .collect()
}

fn shipped_filter() -> KeywordFilter {
    KeywordFilter::from_config(&parse_storefront_config(SHIPPED).expect("storefront.yaml"))
}

fn handles(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.handle.as_str()).collect()
}

#[test]
fn rules_are_ordered_with_handle_sets_before_seasons() {
    let filter = shipped_filter();
    let names: Vec<&str> = filter.rules().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "blank",
            "all",
            "hidden-homepage-featured-items",
            "hidden-homepage-carousel",
            "winter",
            "summer",
            "europe",
            "text",
        ]
    );
}

#[test]
fn blank_keyword_returns_full_catalog() {
    let products = catalog();
    let filter = shipped_filter();
    assert_eq!(filter.apply(None, &products), products);
    assert_eq!(filter.apply(Some(""), &products), products);
}

#[test]
fn keyword_containing_all_returns_full_catalog() {
    let products = catalog();
    let filter = shipped_filter();
    assert_eq!(filter.apply(Some("all-products"), &products), products);
    // Substring match: "football" contains "all".
    assert_eq!(filter.apply(Some("football"), &products), products);
}

#[test]
fn featured_items_follow_configured_order() {
    let products = catalog();
    let result = shipped_filter().apply(Some("hidden-homepage-featured-items"), &products);
    assert_eq!(
        handles(&result),
        vec!["bali-surf-camp", "beervana-portland", "climbing-new-zealand"]
    );
}

#[test]
fn carousel_follows_configured_order() {
    let products = catalog();
    let result = shipped_filter().apply(Some("hidden-homepage-carousel"), &products);
    assert_eq!(
        handles(&result),
        vec![
            "cycling-tuscany",
            "downhill-skiing-wyoming",
            "gastronomic-marais-tour",
            "napa-wine-tasting",
            "ski-touring-mont-blanc",
        ]
    );
}

#[test]
fn carousel_covers_catalog_positions_four_through_eight() {
    let products = catalog();
    let expected: Vec<&str> = handles(&products[4..=8]);
    let result = shipped_filter().apply(Some("hidden-homepage-carousel"), &products);
    assert_eq!(handles(&result), expected);
}

#[test]
fn handle_set_skips_members_missing_from_catalog() {
    let collection = CollectionConfig {
        handle: "hidden-picks".to_owned(),
        title: "Picks".to_owned(),
        description: String::new(),
        products: Some(vec![
            "tahoe-skiing".to_owned(),
            "no-such-adventure".to_owned(),
            "bali-surf-camp".to_owned(),
        ]),
    };
    let filter = KeywordFilter::new([&collection]);
    let result = filter.apply(Some("hidden-picks"), &catalog());
    assert_eq!(handles(&result), vec!["tahoe-skiing", "bali-surf-camp"]);
}

#[test]
fn handle_set_on_empty_catalog_is_empty() {
    let result = shipped_filter().apply(Some("hidden-homepage-carousel"), &[]);
    assert!(result.is_empty());
}

#[test]
fn winter_keyword_selects_ski_and_winter_titles() {
    let products = catalog();
    let result = shipped_filter().apply(Some("winter-wonderland"), &products);
    assert_eq!(
        handles(&result),
        vec![
            "downhill-skiing-wyoming",
            "ski-touring-mont-blanc",
            "tahoe-skiing"
        ]
    );
    for product in &result {
        let title = product.title.to_lowercase();
        assert!(title.contains("ski") || title.contains("winter"));
    }
}

#[test]
fn summer_collection_selects_warm_weather_titles() {
    let result = shipped_filter().apply(Some("summer-collection"), &catalog());
    assert_eq!(
        handles(&result),
        vec![
            "bali-surf-camp",
            "climbing-new-zealand",
            "cycling-southern-utah",
            "cycling-tuscany",
            "gastronomic-marais-tour",
            "napa-wine-tasting",
            "yosemite-backpacking",
            "riverside-camping-australia",
        ]
    );
}

#[test]
fn europe_keyword_is_case_insensitive() {
    let result = shipped_filter().apply(Some("Europe-Collection"), &catalog());
    assert_eq!(
        handles(&result),
        vec![
            "cycling-tuscany",
            "gastronomic-marais-tour",
            "ski-touring-mont-blanc"
        ]
    );
}

#[test]
fn free_text_matches_title_or_description() {
    let products = catalog();
    let filter = shipped_filter();
    assert_eq!(
        handles(&filter.apply(Some("Beer"), &products)),
        vec!["beervana-portland"]
    );
    // "Paris" only appears in a description.
    assert_eq!(
        handles(&filter.apply(Some("PARIS-trip"), &products)),
        vec!["gastronomic-marais-tour"]
    );
    assert!(filter.apply(Some("antarctica"), &products).is_empty());
}

#[test]
fn resolve_reports_matching_rule() {
    let filter = shipped_filter();
    let rule = filter.resolve(Some("winter-collection")).expect("rule");
    assert_eq!(rule.name, "winter");
    assert_eq!(rule.trigger, Trigger::Normalized("winter".to_owned()));
    assert_eq!(
        filter.resolve(Some("kayak")).map(|r| &r.selection),
        Some(&Selection::TitleOrDescription)
    );
}

#[test]
fn normalize_keyword_cuts_at_first_dash() {
    assert_eq!(normalize_keyword("Winter-Wonderland-2024"), "winter");
    assert_eq!(normalize_keyword("Surf"), "surf");
    assert_eq!(normalize_keyword("-leading"), "");
}
