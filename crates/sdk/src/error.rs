//! SDK error types with normalization context.
//!
//! Provides the normalized taxonomy every store relies on:
//! - **Transport errors**: unreachable backend, timeouts, malformed requests
//! - **Server errors**: non-2xx responses with the backend's `{ message }` body
//! - **Cancellation**: superseded requests, silently dropped by stores
//!
//! Stores never let an `ApiError` escape: each action folds the error into
//! its own localized `error` field and returns a boolean outcome.

use snafu::{Location, Snafu};

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Normalized error for API access.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    /// No bearer token in the session; the request was never sent.
    #[snafu(display("authentication token missing from session"))]
    AuthTokenMissing,

    /// The backend answered with a non-2xx status.
    #[snafu(display("server error (status={status}): {message}"))]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the status line when absent.
        message: String,
    },

    /// No response was received (connect failure or timeout).
    #[snafu(display("backend unreachable at {location}: {message}"))]
    NetworkUnreachable {
        /// Underlying transport description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The request could not be built (bad URL, unserializable body).
    #[snafu(display("request configuration error: {message}"))]
    RequestConfig {
        /// Error description.
        message: String,
    },

    /// The request was superseded by a newer one. Never user-facing.
    #[snafu(display("request superseded"))]
    Cancelled,

    /// A 2xx response body did not decode into the expected shape.
    #[snafu(display("response decoding failed: {message}"))]
    Decode {
        /// Decoder description.
        message: String,
    },

    /// Client configuration validation error.
    #[snafu(display("configuration error: {message}"))]
    Config {
        /// Error description.
        message: String,
    },

    /// Base URL parsing error.
    #[snafu(display("invalid URL '{url}': {message}"))]
    InvalidUrl {
        /// The invalid URL.
        url: String,
        /// Parse error description.
        message: String,
    },

    /// Persisted session state could not be read or written.
    #[snafu(display("session storage error at {location}: {message}"))]
    Storage {
        /// Error description.
        message: String,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },
}

impl ApiError {
    /// Returns true for a superseded request, which stores must drop without
    /// recording an error.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code for server responses.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the backend answered 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The short diagnostic used inside localized store messages: the server
    /// body message when one exists, otherwise the error's own description.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::NetworkUnreachable { message: err.to_string(), location: Location::default() }
        } else if err.is_builder() {
            Self::RequestConfig { message: err.to_string() }
        } else if err.is_decode() {
            Self::Decode { message: err.to_string() }
        } else if let Some(status) = err.status() {
            Self::Server { status: status.as_u16(), message: err.to_string() }
        } else {
            Self::NetworkUnreachable { message: err.to_string(), location: Location::default() }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_cancelled() {
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::AuthTokenMissing.is_cancelled());
    }

    #[test]
    fn test_status_accessor() {
        let err = ApiError::Server { status: 404, message: "Not Found".to_owned() };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());

        let err = ApiError::AuthTokenMissing;
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_detail_prefers_server_body_message() {
        let err = ApiError::Server { status: 500, message: "clave duplicada".to_owned() };
        assert_eq!(err.detail(), "clave duplicada");
    }

    #[test]
    fn test_detail_falls_back_to_display() {
        let err = ApiError::RequestConfig { message: "bad body".to_owned() };
        assert_eq!(err.detail(), "request configuration error: bad body");
    }

    #[test]
    fn test_conflict_status_survives() {
        let err = ApiError::Server { status: 500, message: "fk violation".to_owned() };
        assert_eq!(err.status(), Some(500));
    }
}
