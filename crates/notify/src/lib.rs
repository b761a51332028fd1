//! Notification delivery for discovered job postings.
//!
//! This crate provides:
//! - `DeliveryChannel` trait for pluggable destinations
//! - Slack Web API and log-only channel implementations
//! - Block Kit message formatting for job records
//! - `Dispatcher` that suppresses repeats and isolates per-item failures

pub mod dispatcher;
pub mod formatter;
pub mod log_channel;
pub mod payload;
pub mod slack;
pub mod tracker;
pub mod traits;

pub use dispatcher::{DeliveryResult, DeliverySummary, Dispatcher};
pub use formatter::format_job;
pub use log_channel::LogChannel;
pub use payload::NotificationPayload;
pub use slack::SlackChannel;
pub use tracker::{DeliveryTracker, InMemoryDeliverySet};
pub use traits::{Ack, ChannelId, DeliveryChannel, NotifyError};
