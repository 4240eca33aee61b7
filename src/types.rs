use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::errors::SentrygramError;

/// Alert severity levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl Display for AlertLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Info => write!(f, "info"),
            AlertLevel::Warning => write!(f, "warning"),
            AlertLevel::Error => write!(f, "error"),
            AlertLevel::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for AlertLevel {
    type Err = SentrygramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AlertLevel::Info),
            "warning" => Ok(AlertLevel::Warning),
            "error" => Ok(AlertLevel::Error),
            "critical" => Ok(AlertLevel::Critical),
            other => Err(SentrygramError::InvalidLevel(other.to_string())),
        }
    }
}

/// Optional metadata attached to an alert
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertOptions {
    pub level: Option<AlertLevel>,
    pub context: Option<Map<String, Value>>,
}

impl AlertOptions {
    pub fn with_level(mut self, level: AlertLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    /// Add a single context entry, creating the context if needed
    pub fn with_context_entry(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// Sentrygram alert payload
///
/// Only the fields that were set are serialized; the API never sees
/// `null` for `level` or `context`.
///
/// # Example
///
/// ```rust
/// use sentrygram::{Alert, AlertLevel};
///
/// let alert = Alert::new("Payment failed")
///     .with_level(AlertLevel::Error)
///     .with_context_entry("order_id", 4521)
///     .with_context_entry("provider", "stripe");
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Alert {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<AlertLevel>,

    /// Arbitrary JSON shown alongside the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl Alert {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: None,
            context: None,
        }
    }

    /// Apply level and context from `options`
    pub fn with_options(mut self, options: AlertOptions) -> Self {
        self.level = options.level;
        self.context = options.context;
        self
    }

    pub fn with_level(mut self, level: AlertLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_context_entry(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// Error body returned by the API on 4xx responses
///
/// Shaped as `{"detail": {"error": "...", "retry_after": 30}}`. Each field
/// is read on its own, so a malformed `retry_after` does not hide the
/// error code.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ErrorResponse {
    error: Option<String>,
    /// Seconds until the rate limit resets
    retry_after: Option<f64>,
}

impl ErrorResponse {
    /// Decode an error body, treating anything unparseable as empty
    pub fn parse(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return Self::default();
        };

        Self {
            error: value
                .pointer("/detail/error")
                .and_then(Value::as_str)
                .map(str::to_string),
            retry_after: value.pointer("/detail/retry_after").and_then(Value::as_f64),
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn retry_after(&self) -> Option<f64> {
        self.retry_after
    }
}
