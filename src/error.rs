// ⚠️ Errors - failures talking to the dashboard backend

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("backend unreachable: {0}")]
    Network(String),

    #[error("backend answered HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("malformed payload from {endpoint}: {reason}")]
    Parse { endpoint: String, reason: String },

    #[error("backend rejected {endpoint}: {message}")]
    Rejected { endpoint: String, message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
