//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use extraction::ProductExtractor;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domains::lists::ListService;
use crate::server::error::ApiError;
use crate::server::routes::{health_handler, lists_router, scrape_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub lists: Arc<ListService>,
    pub extractor: Arc<ProductExtractor>,
}

impl AppState {
    pub fn new(lists: ListService, extractor: ProductExtractor) -> Self {
        Self {
            lists: Arc::new(lists),
            extractor: Arc::new(extractor),
        }
    }
}

/// Build the router: `/health` plus the JSON API under `/api`.
///
/// `allowed_origins` restricts CORS; an empty slice allows any origin.
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/scrape", post(scrape_handler))
        .merge(lists_router());

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .fallback(not_found)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unmatched routes answer with the JSON envelope too.
async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
