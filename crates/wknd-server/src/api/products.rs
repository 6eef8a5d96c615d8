use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use wknd_core::Product;
use wknd_storefront::ProductQuery;

use crate::middleware::RequestId;

use super::{map_storefront_error, parse_sort_key, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ProductListQuery {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub reverse: Option<bool>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let query = ProductQuery {
        query: params.query,
        sort_key: parse_sort_key(&req_id.0, params.sort.as_deref())?,
        reverse: params.reverse.unwrap_or(false),
    };

    let products = state
        .storefront
        .get_products(&query)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(products, req_id.0)))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let product = state
        .storefront
        .get_product(&handle)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::not_found(req_id.0.clone(), "product", &handle))?;

    Ok(Json(ApiResponse::new(product, req_id.0)))
}

pub(super) async fn list_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let product = state
        .storefront
        .get_product(&handle)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::not_found(req_id.0.clone(), "product", &handle))?;

    let recommendations = state
        .storefront
        .get_product_recommendations(&product.id)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(recommendations, req_id.0)))
}
