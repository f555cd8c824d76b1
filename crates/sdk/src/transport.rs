//! HTTP access layer.
//!
//! One uniform request path for every store: bearer-token injection from the
//! session context, JSON bodies, and normalization of every failure mode into
//! [`ApiError`]. The transport holds no store state and interprets nothing;
//! callers decide what a 404 or an empty list means for their entity.

use std::sync::Arc;

pub use reqwest::Method;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    error::{ApiError, Result},
    session::SessionContext,
};

/// Error body shape the backend uses for failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Uniform request executor for the admin API.
pub struct ApiTransport {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl std::fmt::Debug for ApiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTransport").field("base_url", &self.base_url).finish()
    }
}

impl ApiTransport {
    /// Builds the transport from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ClientConfig, session: Arc<SessionContext>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|err| ApiError::Config {
                message: format!("failed to build HTTP client: {err}"),
            })?;

        Ok(Self { http, base_url: config.base_url().to_owned(), session })
    }

    /// Executes one API call and returns the decoded JSON body.
    ///
    /// `path` is relative to `{base}/api/` and must already carry any encoded
    /// query string. With `requires_auth` and no token in the session, fails
    /// with [`ApiError::AuthTokenMissing`] before any network activity.
    ///
    /// An empty 2xx body decodes as JSON `null`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        requires_auth: bool,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/api/{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if requires_auth {
            let token = self.session.token().ok_or(ApiError::AuthTokenMissing)?;
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        tracing::debug!(%method, %url, "api request");
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if !status.is_success() {
            let message = Self::failure_message(status, response.text().await.ok());
            tracing::debug!(%method, %url, status = status.as_u16(), %message, "api failure");
            return Err(ApiError::Server { status: status.as_u16(), message });
        }

        let text = response.text().await.map_err(ApiError::from)?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// GET helper decoding the body into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, requires_auth: bool) -> Result<T> {
        let value = self.execute(Method::GET, path, None, requires_auth).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Authenticated write helper; the decoded response body is returned for
    /// callers that need it (e.g. created records).
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.execute(method, path, body, true).await
    }

    /// Extracts the backend's `{ message }` or falls back to the status line.
    fn failure_message(status: reqwest::StatusCode, body: Option<String>) -> String {
        if let Some(body) = body {
            if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
                if let Some(message) = parsed.message {
                    if !message.is_empty() {
                        return message;
                    }
                }
            }
        }
        status.canonical_reason().unwrap_or("unknown error").to_owned()
    }
}

/// Percent-encodes a search term for use inside a query string.
#[must_use]
pub(crate) fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefers_body() {
        let msg = ApiTransport::failure_message(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            Some(r#"{"message":"clave duplicada"}"#.to_owned()),
        );
        assert_eq!(msg, "clave duplicada");
    }

    #[test]
    fn test_failure_message_falls_back_to_status_line() {
        let msg = ApiTransport::failure_message(reqwest::StatusCode::NOT_FOUND, None);
        assert_eq!(msg, "Not Found");

        let msg = ApiTransport::failure_message(
            reqwest::StatusCode::BAD_GATEWAY,
            Some("<html>gateway</html>".to_owned()),
        );
        assert_eq!(msg, "Bad Gateway");
    }

    #[test]
    fn test_failure_message_ignores_empty_body_message() {
        let msg = ApiTransport::failure_message(
            reqwest::StatusCode::BAD_REQUEST,
            Some(r#"{"message":""}"#.to_owned()),
        );
        assert_eq!(msg, "Bad Request");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("feria 2026"), "feria+2026");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query("ñandú"), "%C3%B1and%C3%BA");
    }
}
