//! Cart endpoints. Every operation answers with the same mock cart; request
//! bodies are validated for shape but otherwise ignored.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use wknd_core::Cart;
use wknd_storefront::{CartLineInput, CartLineUpdate};

use crate::middleware::RequestId;

use super::{map_storefront_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AddLinesBody {
    pub lines: Vec<CartLineInput>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateLinesBody {
    pub lines: Vec<CartLineUpdate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RemoveLinesBody {
    pub line_ids: Vec<String>,
}

type CartResult = Result<Json<ApiResponse<Cart>>, ApiError>;

pub(super) async fn create_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> CartResult {
    let cart = state
        .storefront
        .create_cart()
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(cart, req_id.0)))
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(cart_id): Path<String>,
) -> CartResult {
    let cart = state
        .storefront
        .get_cart(&cart_id)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(cart, req_id.0)))
}

pub(super) async fn add_lines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(cart_id): Path<String>,
    Json(body): Json<AddLinesBody>,
) -> CartResult {
    let cart = state
        .storefront
        .add_to_cart(&cart_id, &body.lines)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(cart, req_id.0)))
}

pub(super) async fn update_lines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(cart_id): Path<String>,
    Json(body): Json<UpdateLinesBody>,
) -> CartResult {
    let cart = state
        .storefront
        .update_cart(&cart_id, &body.lines)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(cart, req_id.0)))
}

pub(super) async fn remove_lines(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(cart_id): Path<String>,
    Json(body): Json<RemoveLinesBody>,
) -> CartResult {
    let cart = state
        .storefront
        .remove_from_cart(&cart_id, &body.line_ids)
        .await
        .map_err(|e| map_storefront_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(cart, req_id.0)))
}
