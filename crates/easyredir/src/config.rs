//! Connection settings for the Easyredir API.

use std::time::Duration;

/// Production endpoint for the Easyredir REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.easyredir.com/v1";

/// Connection settings consumed by [`crate::Client`].
///
/// Immutable once the client is built; construct a fresh value to point at a
/// different endpoint or credential pair. No timeout is applied unless one is
/// set explicitly, leaving the HTTP client's own defaults in effect.
#[derive(Debug, Clone)]
pub struct Config {
    base_url: String,
    api_key: String,
    api_secret: String,
    timeout: Option<Duration>,
}

impl Config {
    /// Settings for the production endpoint with the given credential pair.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: None,
        }
    }

    /// Override the base URL, e.g. to target a mock server in tests.
    ///
    /// A trailing slash is stripped so paths can always be appended verbatim.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Apply a request timeout to every call made through the client.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }

    pub(crate) const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
