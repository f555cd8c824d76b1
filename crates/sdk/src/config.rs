//! Client configuration with builder pattern.
//!
//! Type-safe configuration for the admin SDK:
//! - Backend base URL
//! - Request and connection timeouts
//!
//! Every call the SDK makes is bounded by the request timeout; expiry
//! surfaces as [`crate::ApiError::NetworkUnreachable`].

use std::time::Duration;

use snafu::ensure;

use crate::error::{ConfigSnafu, InvalidUrlSnafu, Result};

/// Default request timeout (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (5 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the admin API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. `https://backend.eventra.app`). The transport
    /// appends `/api/{resource}`.
    pub(crate) base_url: String,

    /// Request timeout.
    pub(crate) timeout: Duration,

    /// Connection establishment timeout.
    pub(crate) connect_timeout: Duration,
}

impl ClientConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Returns the configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Sets the backend base URL. Must be a valid HTTP(S) URL.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    ///
    /// Default: 30 seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection establishment timeout.
    ///
    /// Default: 5 seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Builds the configuration, validating all settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No base URL provided, or the URL is invalid
    /// - Timeout is zero
    /// - Connect timeout is zero
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| ConfigSnafu { message: "base_url is required" }.build())?;
        validate_url(&base_url)?;

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        ensure!(!timeout.is_zero(), ConfigSnafu { message: "timeout cannot be zero" });

        let connect_timeout = self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        ensure!(
            !connect_timeout.is_zero(),
            ConfigSnafu { message: "connect_timeout cannot be zero" }
        );

        Ok(ClientConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
            connect_timeout,
        })
    }
}

/// Validates that a URL is well-formed HTTP(S).
fn validate_url(url: &str) -> Result<()> {
    // Basic validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return InvalidUrlSnafu { url, message: "URL must start with http:// or https://" }.fail();
    }

    // Check there's something after the scheme
    let rest = url.strip_prefix("http://").or_else(|| url.strip_prefix("https://")).unwrap_or("");

    if rest.is_empty() {
        return InvalidUrlSnafu { url, message: "URL must have a host" }.fail();
    }

    // Check for invalid characters
    if rest.contains(char::is_whitespace) {
        return InvalidUrlSnafu { url, message: "URL cannot contain whitespace" }.fail();
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ClientConfig::builder().with_base_url("http://localhost:3000").build();

        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config =
            ClientConfig::builder().with_base_url("https://backend.eventra.app/").build().unwrap();
        assert_eq!(config.base_url(), "https://backend.eventra.app");
    }

    #[test]
    fn test_missing_base_url() {
        let result = ClientConfig::builder().build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base_url"));
    }

    #[test]
    fn test_invalid_url_no_scheme() {
        let result = ClientConfig::builder().with_base_url("localhost:3000").build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http://"));
    }

    #[test]
    fn test_invalid_url_empty_host() {
        let result = ClientConfig::builder().with_base_url("http://").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_url_whitespace() {
        let result = ClientConfig::builder().with_base_url("http://local host:3000").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout() {
        let result = ClientConfig::builder()
            .with_base_url("http://localhost:3000")
            .with_timeout(Duration::ZERO)
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_zero_connect_timeout() {
        let result = ClientConfig::builder()
            .with_base_url("http://localhost:3000")
            .with_connect_timeout(Duration::ZERO)
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_custom_timeouts() {
        let config = ClientConfig::builder()
            .with_base_url("http://localhost:3000")
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_https_url_valid() {
        let result = ClientConfig::builder().with_base_url("https://backend.eventra.app").build();
        assert!(result.is_ok());
    }
}
