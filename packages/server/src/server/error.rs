//! Mapping from domain errors to HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use extraction::ExtractionError;
use thiserror::Error;
use tracing::{error, warn};

use crate::common::ApiResponse;
use crate::domains::lists::ListError;

/// Error returned by handlers; rendered as `{ success: false, error }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ApiResponse::error(self.to_string()))).into_response()
    }
}

impl From<ListError> for ApiError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::NotFound => ApiError::NotFound("List not found".into()),
            ListError::Validation(msg) => ApiError::BadRequest(msg),
            ListError::Store(e) => {
                error!(error = %e, "List store failure");
                ApiError::Internal
            }
            ListError::Corrupt(e) => {
                error!(error = %e, "Stored list could not be decoded");
                ApiError::Internal
            }
        }
    }
}

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match &err {
            ExtractionError::MissingUrl => ApiError::BadRequest("URL is required".into()),
            e if e.is_blocked() => {
                warn!(error = %e, "Rejected scrape URL");
                ApiError::BadRequest(format!("URL not allowed: {}", e))
            }
            e => {
                warn!(error = %e, "Scrape fetch failed");
                ApiError::BadGateway("Failed to fetch external URL".into())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use extraction::{FetchError, SecurityError};

    #[test]
    fn list_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::from(ListError::NotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ListError::Validation("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ListError::Store(StoreError::InvalidTtl(
                std::time::Duration::MAX
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_details_are_not_leaked() {
        let err = ApiError::from(ListError::Store(StoreError::InvalidTtl(
            std::time::Duration::MAX,
        )));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn extraction_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::from(ExtractionError::MissingUrl).to_string(),
            "URL is required"
        );

        let blocked = ExtractionError::Fetch(FetchError::Security(SecurityError::BlockedHost(
            "localhost".into(),
        )));
        assert_eq!(ApiError::from(blocked).status(), StatusCode::BAD_REQUEST);

        let upstream = ExtractionError::Fetch(FetchError::Status {
            status: 500,
            url: "https://shop.test".into(),
        });
        let err = ApiError::from(upstream);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Failed to fetch external URL");
    }
}
