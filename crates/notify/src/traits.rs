//! Delivery channel trait definition and shared error types.

use std::fmt;

use crate::payload::NotificationPayload;

/// Errors that can occur during channel resolution or delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("channel '{0}' not found; make sure the bot is a member")]
    ChannelNotFound(String),

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Opaque destination identifier returned by channel resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport acknowledgement for a delivered payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    /// Provider message identifier, when the transport returns one.
    pub message_id: Option<String>,
}

/// Trait for notification destinations.
#[async_trait::async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Look up the destination by its human name (without `#`).
    async fn resolve_channel(&self, name: &str) -> Result<ChannelId, NotifyError>;

    /// Deliver one payload to a resolved destination.
    async fn send(
        &self,
        channel: &ChannelId,
        payload: &NotificationPayload,
    ) -> Result<Ack, NotifyError>;

    /// Human-readable transport name (e.g., "slack", "log").
    fn transport_name(&self) -> &str;
}
