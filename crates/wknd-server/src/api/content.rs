use axum::{
    extract::{Path, State},
    Extension, Json,
};
use wknd_core::{Menu, Page};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

pub(super) async fn get_menu(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Json<ApiResponse<Vec<Menu>>> {
    Json(ApiResponse::new(state.storefront.get_menu(&handle), req_id.0))
}

pub(super) async fn get_footer_menu(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Json<ApiResponse<Vec<Menu>>> {
    Json(ApiResponse::new(
        state.storefront.get_footer_menu(&handle),
        req_id.0,
    ))
}

pub(super) async fn list_pages(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Page>>> {
    Json(ApiResponse::new(state.storefront.get_pages(), req_id.0))
}

pub(super) async fn get_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> Result<Json<ApiResponse<Page>>, ApiError> {
    let page = state
        .storefront
        .get_page(&handle)
        .ok_or_else(|| ApiError::not_found(req_id.0.clone(), "page", &handle))?;

    Ok(Json(ApiResponse::new(page, req_id.0)))
}
