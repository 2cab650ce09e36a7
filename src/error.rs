//! Error types for the relay
//!
//! Provides unified error handling using thiserror. Every failure carries an
//! [`ErrorKind`] tag, and the HTTP status is a pure function of that tag.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ProblemDetails;

/// Generic detail returned when the image source fails.
pub const IMAGE_SOURCE_DETAIL: &str = "An error occurred while querying http.cat";

/// Generic detail returned when an upstream payload cannot be parsed.
pub const PARSE_DETAIL: &str = "An error occurred while parsing HTTP response";

// == Error Kind ==
/// Classification of a relay failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HEAD probe to the caller's URL did not complete
    Probe,
    /// The image endpoint failed or answered with a non-success status
    ImageSource,
    /// A structured upstream payload could not be parsed
    Parse,
    /// Anything else
    Unclassified,
}

impl ErrorKind {
    /// Maps a failure class to the response status code.
    pub const fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Probe | ErrorKind::ImageSource => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Parse => StatusCode::BAD_REQUEST,
            ErrorKind::Unclassified => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Relay Error Enum ==
/// Unified error type for the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The status probe could not be completed
    #[error("HTTP query failed")]
    QueryFailed {
        /// Target URL as decoded from the request path
        url: String,
        /// Underlying transport or request-building failure
        #[source]
        source: reqwest::Error,
    },

    /// The `{url}` path segment could not be decoded into a target URL
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// The image source could not serve the image
    #[error("Image source error: {0}")]
    ImageSource(String),

    /// Upstream payload could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::QueryFailed { .. } | RelayError::InvalidTarget(_) => ErrorKind::Probe,
            RelayError::ImageSource(_) => ErrorKind::ImageSource,
            RelayError::Parse(_) => ErrorKind::Parse,
            RelayError::Internal(_) => ErrorKind::Unclassified,
        }
    }

    /// Returns the message placed in the problem payload's `detail` field.
    pub fn detail(&self) -> String {
        match self {
            RelayError::QueryFailed { url, source } => {
                // reqwest's Display omits the cause (refused connection, DNS failure)
                match std::error::Error::source(source) {
                    Some(_) => format!(
                        "Failed on query to {}; {}: {}",
                        url,
                        source,
                        root_cause(source)
                    ),
                    None => format!("Failed on query to {}; {}", url, source),
                }
            }
            RelayError::InvalidTarget(reason) => {
                format!("Failed on query to the requested URL; {}", reason)
            }
            RelayError::ImageSource(_) => IMAGE_SOURCE_DETAIL.to_string(),
            RelayError::Parse(_) => PARSE_DETAIL.to_string(),
            RelayError::Internal(msg) => format!("An error occurred: {}", msg),
        }
    }
}

/// Follows the `source()` chain down to the innermost error.
fn root_cause<'a>(
    err: &'a (dyn std::error::Error + 'static),
) -> &'a (dyn std::error::Error + 'static) {
    let mut cause = err;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause
}

// == IntoResponse Implementation ==
impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.kind().status_code();

        match &self {
            RelayError::QueryFailed { .. } => {
                tracing::error!(error = ?self, "Failed on query for status code")
            }
            RelayError::InvalidTarget(reason) => {
                tracing::error!(error = %reason, "Failed on query for status code")
            }
            RelayError::ImageSource(msg) => {
                tracing::error!(error = %msg, "An error occurred while querying http.cat")
            }
            RelayError::Parse(e) => {
                tracing::error!(error = %e, "An error occurred while parsing HTTP response")
            }
            RelayError::Internal(msg) => tracing::error!(error = %msg, "An error occurred"),
        }

        let body = Json(ProblemDetails::new(status, self.detail()));

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            body,
        )
            .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the relay.
pub type Result<T> = std::result::Result<T, RelayError>;
