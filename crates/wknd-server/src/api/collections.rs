use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use wknd_core::{Collection, Product};

use crate::middleware::RequestId;

use super::{map_storefront_error, parse_sort_key, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CollectionProductsQuery {
    pub sort: Option<String>,
    pub reverse: Option<bool>,
}

pub(super) async fn list_collections(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Collection>>> {
    Json(ApiResponse::new(state.storefront.get_collections(), req_id.0))
}

pub(super) async fn get_collection(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Collection>>, ApiError> {
    let collection = state
        .storefront
        .get_collection(&handle)
        .ok_or_else(|| ApiError::not_found(req_id.0.clone(), "collection", &handle))?;

    Ok(Json(ApiResponse::new(collection, req_id.0)))
}

/// Unknown handles are not rejected: the handle is used as a search keyword,
/// so `/collections/surf/products` behaves like a search for "surf".
pub(super) async fn list_collection_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
    Query(params): Query<CollectionProductsQuery>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let sort_key = parse_sort_key(&req_id.0, params.sort.as_deref())?;
    let products = state
        .storefront
        .get_collection_products(&handle, sort_key, params.reverse.unwrap_or(false))
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(products, req_id.0)))
}
