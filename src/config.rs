use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Base URL of the hosted Sentrygram API
pub const DEFAULT_BASE_URL: &str = "https://api.sentrygram.com";

/// Configuration for [`SentrygramClient`](crate::SentrygramClient)
///
/// A bare API key converts into a config with the default base URL, so
/// anything accepting `impl Into<ClientConfig>` also accepts a `&str`.
///
/// # Example
///
/// ```rust
/// use sentrygram::ClientConfig;
///
/// let config = ClientConfig::new("sk_live_123").with_base_url("https://sentrygram.internal/");
/// assert_eq!(config.resolved_base_url(), "https://sentrygram.internal");
/// ```
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Override for the API base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ClientConfig {
    /// Create a config using the default base URL
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Base URL the client will talk to
    ///
    /// An absent or empty override falls back to [`DEFAULT_BASE_URL`].
    /// Every trailing `/` is stripped, not just the last one.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }
}

impl From<&str> for ClientConfig {
    fn from(api_key: &str) -> Self {
        Self::new(api_key)
    }
}

impl From<String> for ClientConfig {
    fn from(api_key: String) -> Self {
        Self::new(api_key)
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
