use axum::{extract::rejection::JsonRejection, extract::State, Json};
use extraction::ScrapedData;
use serde::Deserialize;

use crate::common::ApiResponse;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: String,
}

/// `POST /api/scrape`
///
/// Unlike adding an item, this surfaces fetch failures to the caller
/// instead of returning a fallback record.
pub async fn scrape_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ScrapedData>>, ApiError> {
    let Json(request) = payload?;
    let data = state.extractor.extract(&request.url).await?;
    Ok(Json(ApiResponse::ok(data)))
}
