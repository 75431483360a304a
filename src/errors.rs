//! Typed errors for the leadform library.
//!
//! Two enums cover the two collaborators that touch the outside world:
//! - `TransportError` — webhook endpoint setup and delivery failures
//! - `TrackingError` — page context that cannot be turned into tracking data
//!
//! Field validation never produces an error; it yields `FieldValidationResult`s.

use thiserror::Error;

/// Errors from delivering a payload to the webhook.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid webhook endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Webhook endpoint '{url}' must use http or https")]
    UnsupportedScheme { url: String },

    #[error("Webhook request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Webhook transport unavailable: {0}")]
    Unavailable(String),
}

/// Errors from capturing page tracking data.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Invalid page URL '{url}': {reason}")]
    InvalidPageUrl { url: String, reason: String },

    #[error("Invalid dimensions '{value}': expected WIDTHxHEIGHT")]
    InvalidDimensions { value: String },
}
