use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("List not found: {0}")]
    NotFound(String),

    #[error("Unexpected response (HTTP {status}): {detail}")]
    InvalidResponse { status: u16, detail: String },

    #[error("Local storage error: {0}")]
    Local(#[from] LocalDbError),
}

impl ClientError {
    /// True when the backend could not serve the request at all: transport
    /// failures, non-JSON bodies and 5xx responses. These trigger the local
    /// fallback; structured 4xx failures do not.
    pub fn is_unavailable(&self) -> bool {
        match self {
            ClientError::Http(_) | ClientError::InvalidResponse { .. } => true,
            ClientError::Api { status, .. } => *status >= 500,
            ClientError::NotFound(_) | ClientError::Local(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum LocalDbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data directory available for the local database")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, ClientError>;
