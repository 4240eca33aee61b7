use reqwest::{Client, Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use tracing::{debug, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::{Result, SentrygramError};
use crate::types::{Alert, AlertOptions, ErrorResponse};

const ALERT_PATH: &str = "/v1/alert";

/// Client for sending alerts through Sentrygram
///
/// The client holds no per-call state; clone it or share it freely
/// across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use sentrygram::{AlertLevel, AlertOptions, SentrygramClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SentrygramClient::new("sk_live_123")?;
///
///     client
///         .alert(
///             "Disk almost full",
///             AlertOptions::default()
///                 .with_level(AlertLevel::Warning)
///                 .with_context_entry("host", "db-1"),
///         )
///         .await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SentrygramClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    alert_url: Url,
}

impl SentrygramClient {
    /// Create a new Sentrygram client
    ///
    /// Accepts either a bare API key or a [`ClientConfig`]. No request is
    /// made until the first alert is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is empty
    /// - The base URL does not form a valid endpoint
    /// - The HTTP client cannot be built
    pub fn new(config: impl Into<ClientConfig>) -> Result<Self> {
        let config = config.into();
        validate_api_key(&config)?;

        let client = Client::builder()
            .build()
            .map_err(SentrygramError::BuildHttpClient)?;

        let client = ClientBuilder::new(client).build();

        Self::with_client(client, config)
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, timeouts, etc.)
    pub fn with_client(
        client: ClientWithMiddleware,
        config: impl Into<ClientConfig>,
    ) -> Result<Self> {
        let config = config.into();
        validate_api_key(&config)?;

        let base_url = config.resolved_base_url().to_string();
        let endpoint = format!("{base_url}{ALERT_PATH}");
        let alert_url = Url::parse(&endpoint).map_err(|source| SentrygramError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url,
            alert_url,
        })
    }

    /// Send an alert message with optional level and context
    ///
    /// Returns `true` once the API accepts the alert.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails
    /// - The account is rate limited (`RateLimited`) or paused (`NotificationsPaused`)
    /// - Sentrygram returns any other non-success status code (`Api`)
    pub async fn alert(&self, message: impl Into<String>, options: AlertOptions) -> Result<bool> {
        let alert = Alert::new(message).with_options(options);
        self.send(&alert).await
    }

    /// Send a prepared alert
    #[instrument(
        name = "SentrygramClient::send",
        skip_all,
        fields(level = ?alert.level, has_context = alert.context.is_some())
    )]
    pub async fn send(&self, alert: &Alert) -> Result<bool> {
        debug!(url = %self.alert_url, "Sending alert to Sentrygram");

        let response = self
            .client
            .post(self.alert_url.clone())
            .bearer_auth(&self.api_key)
            .json(alert)
            .send()
            .await
            .map_err(SentrygramError::Request)?;

        let status = response.status();

        if status.is_success() {
            debug!(status = status.as_u16(), "Alert sent successfully");
            return Ok(true);
        }

        debug!(status = status.as_u16(), "Sentrygram rejected alert");
        Err(error_from_response(response).await)
    }

    /// Get the base API URL, without trailing slashes
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the full alert endpoint URL
    pub fn alert_url(&self) -> &Url {
        &self.alert_url
    }
}

fn validate_api_key(config: &ClientConfig) -> Result<()> {
    if config.api_key.is_empty() {
        return Err(SentrygramError::MissingApiKey);
    }
    Ok(())
}

/// Map a non-success response to an error. The body is only read for
/// statuses whose error depends on it.
async fn error_from_response(response: Response) -> SentrygramError {
    let status = response.status();

    let body = if status == StatusCode::UNAUTHORIZED {
        String::new()
    } else {
        response.text().await.unwrap_or_default()
    };

    classify_error(status, &body)
}

fn classify_error(status: StatusCode, body: &str) -> SentrygramError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            let response = ErrorResponse::parse(body);
            if response.error_code() == Some("notifications_paused") {
                SentrygramError::NotificationsPaused
            } else {
                SentrygramError::RateLimited {
                    retry_after: response.retry_after(),
                }
            }
        }
        StatusCode::UNAUTHORIZED => SentrygramError::Api {
            status: status.as_u16(),
            message: "Invalid API key".to_string(),
        },
        StatusCode::BAD_REQUEST => {
            let message = match ErrorResponse::parse(body).error_code() {
                Some("telegram_not_linked") => {
                    "Telegram not linked. Visit sentrygram.com to link your account.".to_string()
                }
                _ => format!("Bad request: {body}"),
            };
            SentrygramError::Api {
                status: status.as_u16(),
                message,
            }
        }
        _ => SentrygramError::Api {
            status: status.as_u16(),
            message: format!("API error ({}): {body}", status.as_u16()),
        },
    }
}
