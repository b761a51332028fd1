//! One end-to-end pass: resolve the destination, aggregate, deliver.

use std::time::Instant;

use chrono::{DateTime, Utc};

use huntbot_notify::{ChannelId, Dispatcher};
use huntbot_sources::Aggregator;

use crate::error::PipelineError;

/// Counts reported at the end of a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub started_at: DateTime<Utc>,
    /// Unique records handed to the dispatcher.
    pub fetched: usize,
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    pub network_count: usize,
    pub board_count: usize,
}

/// A unit of work the scheduler repeats.
#[async_trait::async_trait]
pub trait PassRunner: Send {
    async fn run_pass(&mut self) -> Result<PassSummary, PipelineError>;
}

/// Aggregator feeding a dispatcher, bound to one named destination.
pub struct Pipeline {
    aggregator: Aggregator,
    dispatcher: Dispatcher,
    channel_name: String,
    channel_id: Option<ChannelId>,
}

impl Pipeline {
    pub fn new(aggregator: Aggregator, dispatcher: Dispatcher, channel_name: impl Into<String>) -> Self {
        Self {
            aggregator,
            dispatcher,
            channel_name: channel_name.into(),
            channel_id: None,
        }
    }

    /// Destination id, once a pass has resolved it.
    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Resolved on first use and cached for the life of the pipeline.
    async fn destination(&mut self) -> Result<ChannelId, PipelineError> {
        if let Some(id) = &self.channel_id {
            return Ok(id.clone());
        }
        let id = self.dispatcher.resolve_channel(&self.channel_name).await?;
        tracing::info!(channel = %self.channel_name, id = %id, "destination resolved");
        self.channel_id = Some(id.clone());
        Ok(id)
    }
}

#[async_trait::async_trait]
impl PassRunner for Pipeline {
    async fn run_pass(&mut self) -> Result<PassSummary, PipelineError> {
        let started_at = Utc::now();
        let start = Instant::now();
        tracing::info!(started_at = %started_at.format("%Y-%m-%d %H:%M:%S"), "pass starting");

        let channel = self.destination().await?;
        let aggregation = self.aggregator.collect().await;
        let delivery = self.dispatcher.deliver_all(&channel, &aggregation.jobs).await;

        let summary = PassSummary {
            started_at,
            fetched: aggregation.jobs.len(),
            sent: delivery.sent,
            skipped: delivery.skipped,
            failed: delivery.failed,
            network_count: aggregation.network_count(),
            board_count: aggregation.board_count(),
        };

        tracing::info!(
            channel = %self.channel_name,
            fetched = summary.fetched,
            network = summary.network_count,
            board = summary.board_count,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "pass complete"
        );

        Ok(summary)
    }
}
