use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::models::ErrorBody;

/// Type alias for Result with ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Error taxonomy for the bulk-delete service
///
/// Every variant maps to one of three HTTP outcomes at the request boundary:
/// 401 (no valid credentials), 400 (caller must correct the request), or
/// 500 (upstream provider or internal failure).
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No valid credential bundle in the caller's session
    #[error("Not authenticated")]
    Unauthenticated,

    /// Caller-supplied input is invalid and must be corrected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// OAuth token exchange or hub construction failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Rate limit exceeded upstream
    #[error("Rate limit exceeded, retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    /// Upstream returned 5xx
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Upstream rejected the request (e.g. malformed search query)
    #[error("Bad request upstream: {0}")]
    UpstreamBadRequest(String),

    /// Resource not found upstream (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Access forbidden upstream (403)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ServiceError {
    /// HTTP status this error surfaces as at the request boundary
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServiceError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Parse the Retry-After header from an HTTP response
///
/// Only the delay-seconds form is handled; a missing or unparseable header
/// falls back to 5 seconds.
fn parse_retry_after_header<B>(response: &hyper::Response<B>) -> u64 {
    const DEFAULT_RETRY_AFTER: u64 = 5;

    response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

impl From<google_gmail1::Error> for ServiceError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // HTTP response with status code (non-success responses)
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                let status_code = status.as_u16();
                let message = format!(
                    "HTTP {}: {}",
                    status_code,
                    status.canonical_reason().unwrap_or("Unknown")
                );

                match status_code {
                    429 => {
                        let retry_after = parse_retry_after_header(response);
                        ServiceError::RateLimitExceeded { retry_after }
                    }
                    404 => ServiceError::NotFound("Resource not found".to_string()),
                    400 => ServiceError::UpstreamBadRequest(message),
                    403 => ServiceError::Forbidden(message),
                    500..=599 => ServiceError::ServerError {
                        status: status_code,
                        message,
                    },
                    _ => ServiceError::ApiError(message),
                }
            }
            // BadRequest variant (request not understood by server)
            google_gmail1::Error::BadRequest(ref err) => {
                ServiceError::UpstreamBadRequest(format!("{}", err))
            }
            // Network/connection errors
            google_gmail1::Error::HttpError(ref err) => {
                ServiceError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => ServiceError::NetworkError(err.to_string()),
            _ => ServiceError::ApiError(error.to_string()),
        }
    }
}
