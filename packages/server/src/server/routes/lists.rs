//! Wishlist endpoints under `/api`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::common::ApiResponse;
use crate::domains::lists::{
    AddItemRequest, CreateListRequest, ListPatch, PublicWishList, UpsertListRequest,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;

type ListResponse = Result<Json<ApiResponse<PublicWishList>>, ApiError>;

pub fn lists_router() -> Router<AppState> {
    Router::new()
        .route("/list", post(create_list))
        .route(
            "/list/:id",
            get(get_list).patch(update_list).delete(delete_list),
        )
        .route("/list/:id/items", post(add_item))
        .route("/list/:id/items/:item_id", delete(remove_item))
        .route("/wishlist", get(get_wishlist).post(save_wishlist))
}

async fn create_list(
    State(state): State<AppState>,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> ListResponse {
    let Json(request) = payload?;
    let list = state.lists.create(request).await?;
    Ok(Json(ApiResponse::ok(list)))
}

async fn get_list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ListResponse {
    let Path(id) = path?;
    let list = state.lists.read(&id).await?;
    Ok(Json(ApiResponse::ok(list)))
}

async fn update_list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ListPatch>, JsonRejection>,
) -> ListResponse {
    let Path(id) = path?;
    let Json(patch) = payload?;
    let list = state.lists.update(&id, patch).await?;
    Ok(Json(ApiResponse::ok(list)))
}

async fn delete_list(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = path?;
    state.lists.delete(&id).await?;
    Ok(Json(ApiResponse::empty()))
}

async fn add_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> ListResponse {
    let Path(id) = path?;
    let Json(request) = payload?;
    let list = state.lists.add_item(&id, request, &state.extractor).await?;
    Ok(Json(ApiResponse::ok(list)))
}

async fn remove_item(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ListResponse {
    let Path((id, item_id)) = path?;
    let list = state.lists.remove_item(&id, &item_id).await?;
    Ok(Json(ApiResponse::ok(list)))
}

#[derive(Debug, Deserialize)]
pub struct WishlistQuery {
    id: Option<String>,
}

async fn get_wishlist(
    State(state): State<AppState>,
    query: Result<Query<WishlistQuery>, QueryRejection>,
) -> ListResponse {
    let Query(query) = query?;
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("ID missing".into()))?;

    let list = state.lists.read(&id).await?;
    Ok(Json(ApiResponse::ok(list)))
}

async fn save_wishlist(
    State(state): State<AppState>,
    payload: Result<Json<UpsertListRequest>, JsonRejection>,
) -> ListResponse {
    let Json(request) = payload?;
    let list = state.lists.upsert(request).await?;
    let id = list.id.clone();
    Ok(Json(ApiResponse::ok(list).with_id(id)))
}
