//! Error types for the Polr API client.
//!
//! # Design
//! Every failure the client reports is one `ApiError` variant, so callers can
//! tell "this client rejected the outcome" apart from unrelated failures by
//! type alone. Transport failures carry no variant of their own: they share
//! `ServerOrConnection` with HTTP 500. `kind()` exposes the variant as a plain
//! `ErrorKind` for callers that only branch on the category.
//!
//! A lookup that finds nothing is not an error; see `Lookup::NotFound`.

use thiserror::Error;

/// Which key the server rejected with HTTP 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedKey {
    /// The API key sent with every request.
    ApiKey,
    /// The access key of a secret short URL, sent with lookups.
    UrlKey,
}

impl std::fmt::Display for RejectedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectedKey::ApiKey => write!(f, "API_KEY invalid or inactive."),
            RejectedKey::UrlKey => {
                write!(f, "given url_key is not valid for secret lookup.")
            }
        }
    }
}

/// Errors returned by `PolrClient` parse methods and the `PolrApi` facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 400 outside of a custom-ending conflict.
    #[error("HTTP 400 Bad Request: Request malformed, or arguments do not fit the required data type.")]
    BadApiRequest,

    /// The response body is not valid JSON.
    #[error("Bad API response: {0}")]
    BadApiResponse(String),

    /// HTTP 401. Names the url key only when a keyed lookup was rejected.
    #[error("HTTP 401 Unauthorized: {0}")]
    UnauthorizedKey(RejectedKey),

    /// HTTP 403 on shorten.
    #[error("HTTP 403 Forbidden: quota is exceeded.")]
    QuotaExceeded,

    /// HTTP 400 on shorten while a custom ending was requested.
    #[error("Custom ending already in use: {0}")]
    CustomEndingUnavailable(String),

    /// HTTP 500, or the request never produced a response.
    #[error("Server or connection error: {0}")]
    ServerOrConnection(String),

    /// A response with an expected status but without the `action`/`result`
    /// pair of the operation. Points at a server defect.
    #[error("Unexpected response to {expected}: {body}")]
    UnexpectedResponse { expected: &'static str, body: String },
}

/// Variant tag of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadApiRequest,
    BadApiResponse,
    UnauthorizedKey,
    QuotaExceeded,
    CustomEndingUnavailable,
    ServerOrConnection,
    UnexpectedResponse,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadApiRequest => ErrorKind::BadApiRequest,
            ApiError::BadApiResponse(_) => ErrorKind::BadApiResponse,
            ApiError::UnauthorizedKey(_) => ErrorKind::UnauthorizedKey,
            ApiError::QuotaExceeded => ErrorKind::QuotaExceeded,
            ApiError::CustomEndingUnavailable(_) => ErrorKind::CustomEndingUnavailable,
            ApiError::ServerOrConnection(_) => ErrorKind::ServerOrConnection,
            ApiError::UnexpectedResponse { .. } => ErrorKind::UnexpectedResponse,
        }
    }
}

/// Discard a classified error, keeping only the success value.
///
/// The dropped error is logged at `warn` so it is not lost entirely.
pub fn no_raise<T>(result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(kind = ?err.kind(), "{err}");
            None
        }
    }
}
