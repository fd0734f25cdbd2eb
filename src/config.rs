//! Client configuration.
//!
//! The MAWAQIT endpoints live at a fixed base URL in production; the URL is
//! configurable so tests can point the client at a local mock server. The
//! request timeout applies to every call made through [`MawaqitClient`],
//! including login.
//!
//! [`MawaqitClient`]: crate::api::MawaqitClient

use std::time::Duration;

/// Base URL for the MAWAQIT REST API (v2)
pub const MAWAQIT_API_BASE: &str = "https://mawaqit.net/api/2.0";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for a
/// home-automation poll cycle.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: MAWAQIT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a non-default base URL (mock servers, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://mawaqit.net/api/2.0");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_with_base_url_keeps_timeout() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
