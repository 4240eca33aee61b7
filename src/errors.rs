use std::time::Duration;
use thiserror::Error;

/// Result type alias for Sentrygram operations
pub type Result<T> = std::result::Result<T, SentrygramError>;

/// Errors that can occur when sending alerts to Sentrygram
///
/// Matching on this enum covers every failure; `RateLimited` and
/// `NotificationsPaused` are the two rate-limit cases.
#[derive(Debug, Error)]
pub enum SentrygramError {
    /// The API key was empty
    #[error("API key is required")]
    MissingApiKey,

    /// The configured base URL does not form a valid endpoint
    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Unknown alert level name
    #[error("Invalid alert level: {0}")]
    InvalidLevel(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Sentrygram API returned an error response
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable description of the failure
        message: String,
    },

    /// Too many alerts; `retry_after` is the server's hint in seconds
    #[error("{}", rate_limit_message(*retry_after))]
    RateLimited { retry_after: Option<f64> },

    /// Notifications are paused on the account
    #[error("Notifications are paused. Reactivate at sentrygram.com")]
    NotificationsPaused,
}

fn rate_limit_message(retry_after: Option<f64>) -> String {
    match retry_after {
        Some(seconds) if seconds > 0.0 => format!("Rate limited. Retry after {seconds} seconds."),
        _ => "Rate limited.".to_string(),
    }
}

impl SentrygramError {
    /// HTTP status code of the response that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } | Self::NotificationsPaused => Some(429),
            Self::Request(source) => source.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Server-provided wait before the next attempt
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited {
                retry_after: Some(seconds),
            } => Duration::try_from_secs_f64(*seconds).ok(),
            _ => None,
        }
    }

    /// Whether the API rejected the alert for rate limiting, paused or not
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::NotificationsPaused)
    }

    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Server errors (5xx status codes)
    /// - Rate limiting, except when notifications are paused
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_connect() || err.is_timeout()
            }
            Self::Request(reqwest_middleware::Error::Middleware(_)) => false,
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }
}
