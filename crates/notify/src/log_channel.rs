//! Channel that writes payloads to the log instead of sending them.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::payload::NotificationPayload;
use crate::traits::{Ack, ChannelId, DeliveryChannel, NotifyError};

/// Dry-run destination: every send succeeds and is logged.
#[derive(Debug, Default)]
pub struct LogChannel {
    sent: AtomicUsize,
}

impl LogChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads logged so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl DeliveryChannel for LogChannel {
    async fn resolve_channel(&self, name: &str) -> Result<ChannelId, NotifyError> {
        Ok(ChannelId(format!("#{}", name.trim_start_matches('#'))))
    }

    async fn send(
        &self,
        channel: &ChannelId,
        payload: &NotificationPayload,
    ) -> Result<Ack, NotifyError> {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            channel = %channel,
            blocks = payload.blocks.len(),
            "[dry-run] {}\n{}",
            payload.text,
            payload.to_plain_text()
        );
        Ok(Ack {
            message_id: Some(format!("dry-run-{n}")),
        })
    }

    fn transport_name(&self) -> &str {
        "log"
    }
}
