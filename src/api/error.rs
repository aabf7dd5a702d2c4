//! Backend API errors.

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid base URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether the backend could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_connect() || source.is_timeout(),
            Self::Status { status, .. } => *status == 503,
            _ => false,
        }
    }

    /// Short message suitable for a fallback view.
    pub fn user_message(&self) -> String {
        if self.is_unavailable() {
            "Backend is unavailable. Please try again later.".to_string()
        } else {
            match self {
                Self::Status { status: 404, .. } => "Nothing found.".to_string(),
                _ => "Something went wrong while loading data.".to_string(),
            }
        }
    }
}

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
