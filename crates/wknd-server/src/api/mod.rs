mod cart;
mod collections;
mod content;
mod products;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use wknd_storefront::{ContentSource, SortKey, Storefront, StorefrontError};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<Storefront<ContentSource>>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    source: &'static str,
    catalog: &'static str,
    products: Option<usize>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub(super) fn not_found(request_id: impl Into<String>, what: &str, handle: &str) -> Self {
        Self::new(request_id, "not_found", format!("{what} '{handle}' not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_storefront_error(request_id: String, error: &StorefrontError) -> ApiError {
    tracing::error!(error = %error, "storefront request failed");
    ApiError::new(request_id, "internal_error", "storefront data unavailable")
}

pub(super) fn parse_sort_key(request_id: &str, raw: Option<&str>) -> Result<SortKey, ApiError> {
    match raw {
        None | Some("") => Ok(SortKey::Relevance),
        Some(raw) => raw
            .parse()
            .map_err(|message: String| ApiError::new(request_id, "validation_error", message)),
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn storefront_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{handle}", get(products::get_product))
        .route(
            "/api/v1/products/{handle}/recommendations",
            get(products::list_recommendations),
        )
        .route("/api/v1/collections", get(collections::list_collections))
        .route(
            "/api/v1/collections/{handle}",
            get(collections::get_collection),
        )
        .route(
            "/api/v1/collections/{handle}/products",
            get(collections::list_collection_products),
        )
        .route("/api/v1/menus/{handle}", get(content::get_menu))
        .route("/api/v1/menus/{handle}/footer", get(content::get_footer_menu))
        .route("/api/v1/pages", get(content::list_pages))
        .route("/api/v1/pages/{handle}", get(content::get_page))
        .route("/api/v1/cart", post(cart::create_cart))
        .route("/api/v1/cart/{cart_id}", get(cart::get_cart))
        .route(
            "/api/v1/cart/{cart_id}/lines",
            post(cart::add_lines)
                .put(cart::update_lines)
                .delete(cart::remove_lines),
        )
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .merge(storefront_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(CompressionLayer::new())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let source = match state.storefront.catalog().source() {
        ContentSource::Remote(_) => "remote",
        ContentSource::Fixture(_) => "fixture",
    };

    match state.storefront.catalog().list_all().await {
        Ok(products) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    source,
                    catalog: "ok",
                    products: Some(products.len()),
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: catalog unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        source,
                        catalog: "unavailable",
                        products: None,
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
