//! Client configuration

use crate::model::CloudContext;
use std::time::Duration;

/// API base URL used when neither the provider configuration nor
/// [`HOST_URL_ENV`] names one.
pub const DEFAULT_HOST_URL: &str = "http://localhost:8073";

/// Environment variable consulted when the provider configuration has no token.
pub const TOKEN_ENV: &str = "CODERFORGE_CLOUD_TOKEN";

/// Environment variable overriding [`DEFAULT_HOST_URL`].
pub const HOST_URL_ENV: &str = "CODERFORGE_HOST_URL";

/// Per-request timeout. Requests are never retried.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to build an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub context: CloudContext,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>, context: CloudContext) -> Self {
        Self {
            base_url: DEFAULT_HOST_URL.to_string(),
            token: token.into(),
            context,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
