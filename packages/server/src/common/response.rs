//! JSON envelope used by every HTTP response.

use serde::{Deserialize, Serialize};

/// `{ success, data?, error? }`
///
/// `id` is only set by the legacy `/api/wishlist` save route, which reports
/// the saved id next to the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl ApiResponse<()> {
    /// Success with no payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            id: None,
        }
    }
}
