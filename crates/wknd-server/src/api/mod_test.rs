use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use tower::ServiceExt;
use wknd_core::{builtin_storefront_config, DEFAULT_ASSET_HOST};
use wknd_storefront::{Catalog, InMemorySource, KeywordFilter};

use super::*;

const FIXTURE: &str = include_str!("../../../../fixtures/adventures.json");

fn app_with(source: InMemorySource) -> Router {
    let config = builtin_storefront_config().expect("builtin config");
    let catalog = Catalog::new(
        ContentSource::Fixture(source),
        DEFAULT_ASSET_HOST,
        Duration::from_secs(3600),
        KeywordFilter::from_config(&config),
    );
    build_app(AppState {
        storefront: Arc::new(Storefront::new(catalog, config)),
    })
}

fn app() -> Router {
    app_with(InMemorySource::from_json(FIXTURE).expect("fixture"))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&body).expect("json parse");
    (status, json)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

fn data_handles(json: &serde_json::Value) -> Vec<String> {
    json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|p| p["handle"].as_str().expect("handle").to_owned())
        .collect()
}

#[test]
fn api_error_not_found_maps_to_404() {
    let response = ApiError::not_found("req-1", "product", "x").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn parse_sort_key_defaults_to_relevance() {
    assert_eq!(parse_sort_key("r", None).unwrap(), SortKey::Relevance);
    assert_eq!(parse_sort_key("r", Some("")).unwrap(), SortKey::Relevance);
    assert_eq!(parse_sort_key("r", Some("title")).unwrap(), SortKey::Title);
    let err = parse_sort_key("r", Some("newest")).unwrap_err();
    assert_eq!(err.error.code, "validation_error");
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let (status, json) = get_json(app(), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["source"], "fixture");
    assert_eq!(json["data"]["products"], 12);
    assert!(json["meta"]["request_id"].is_string());
}

#[tokio::test]
async fn health_on_broken_catalog_is_degraded() {
    let response = app_with(InMemorySource::new(vec![Default::default()]))
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/collections")
                .header(REQUEST_ID_HEADER, "req-abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(
        response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok()),
        Some("req-abc")
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["meta"]["request_id"], "req-abc");
}

#[tokio::test]
async fn list_products_applies_query_and_sort() {
    let (status, json) = get_json(
        app(),
        "/api/v1/products?query=winter&sort=price&reverse=true",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        data_handles(&json),
        vec![
            "ski-touring-mont-blanc",
            "tahoe-skiing",
            "downhill-skiing-wyoming"
        ]
    );
}

#[tokio::test]
async fn list_products_rejects_unknown_sort() {
    let (status, json) = get_json(app(), "/api/v1/products?sort=newest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn get_product_serializes_camel_case() {
    let (status, json) = get_json(app(), "/api/v1/products/bali-surf-camp").await;
    assert_eq!(status, StatusCode::OK);
    let product = &json["data"];
    assert_eq!(product["handle"], "bali-surf-camp");
    assert_eq!(product["priceRange"]["minVariantPrice"]["amount"], "5000");
    assert_eq!(product["variants"].as_array().map(Vec::len), Some(10));
    assert_eq!(product["featuredImage"]["altText"], "Bali Surf Camp");
}

#[tokio::test]
async fn get_product_unknown_is_404() {
    let (status, json) = get_json(app(), "/api/v1/products/no-such-trip").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn recommendations_for_known_product() {
    let (status, json) =
        get_json(app(), "/api/v1/products/tahoe-skiing/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data_handles(&json).len(), 4);

    let (status, _) = get_json(app(), "/api/v1/products/nope/recommendations").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collections_list_and_detail() {
    let (status, json) = get_json(app(), "/api/v1/collections").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["title"], "All");
    assert_eq!(json["data"].as_array().map(Vec::len), Some(4));

    let (status, json) =
        get_json(app(), "/api/v1/collections/hidden-homepage-carousel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["path"], "/search/hidden-homepage-carousel");

    let (status, _) = get_json(app(), "/api/v1/collections/spring").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collection_products_follow_keyword_rules() {
    let (status, json) = get_json(
        app(),
        "/api/v1/collections/hidden-homepage-featured-items/products",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        data_handles(&json),
        vec!["bali-surf-camp", "beervana-portland", "climbing-new-zealand"]
    );
}

#[tokio::test]
async fn menus_and_pages() {
    let (_, json) = get_json(app(), "/api/v1/menus/next-js-frontend-header-menu").await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(4));

    let (_, json) =
        get_json(app(), "/api/v1/menus/next-js-frontend-footer-menu/footer").await;
    assert_eq!(json["data"][5]["path"], "/faq");

    let (_, json) = get_json(app(), "/api/v1/pages").await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(5));

    let (status, json) = get_json(app(), "/api/v1/pages/about").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["bodySummary"], "About the WKND collective.");

    let (status, _) = get_json(app(), "/api/v1/pages/careers").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cart_endpoints_return_static_cart() {
    let app = app();
    let (status, created) =
        send_json(app.clone(), Method::POST, "/api/v1/cart", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["id"], "cart1");
    assert_eq!(created["data"]["cost"]["totalTaxAmount"]["amount"], "10.00");

    let (status, json) = get_json(app.clone(), "/api/v1/cart/cart1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], created["data"]);

    let (status, json) = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/cart/cart1/lines",
        serde_json::json!({"lines": [{"merchandiseId": "m1", "quantity": 2}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["totalQuantity"], 1);

    let (status, _) = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/cart/cart1/lines",
        serde_json::json!({"lines": [{"id": "item1", "merchandiseId": "m1", "quantity": 3}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send_json(
        app,
        Method::DELETE,
        "/api/v1/cart/cart1/lines",
        serde_json::json!({"lineIds": ["item1"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], created["data"]);
}

#[tokio::test]
async fn cart_on_empty_catalog_is_internal_error() {
    let (status, json) = send_json(
        app_with(InMemorySource::default()),
        Method::POST,
        "/api/v1/cart",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "internal_error");
}
