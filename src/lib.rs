//! # Sentrygram
//!
//! A Rust client library for sending alerts to Telegram through [Sentrygram](https://sentrygram.com).
//!
//! ## Features
//!
//! - Send alerts with an optional severity level and JSON context
//! - Typed errors for rate limiting, paused notifications and rejected requests
//! - Bring your own `reqwest-middleware` client for retries or timeouts
//!
//! ## Example
//!
//! ```rust,no_run
//! use sentrygram::{AlertLevel, AlertOptions, ClientConfig, SentrygramClient, SentrygramError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SentrygramClient::new(ClientConfig::new("sk_live_123"))?;
//!
//!     let options = AlertOptions::default()
//!         .with_level(AlertLevel::Critical)
//!         .with_context_entry("service", "billing")
//!         .with_context_entry("failed_jobs", 12);
//!
//!     match client.alert("Payment worker crashed", options).await {
//!         Ok(_) => {}
//!         Err(SentrygramError::RateLimited { .. }) => {
//!             // back off and try later
//!         }
//!         Err(err) => return Err(err.into()),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod errors;
mod types;

pub use client::SentrygramClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use errors::{Result, SentrygramError};
pub use types::{Alert, AlertLevel, AlertOptions};
