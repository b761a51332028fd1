//! Delivers formatted job notifications through a [`DeliveryChannel`].
//!
//! The dispatcher consults the [`DeliveryTracker`] before every send and
//! commits a delivery key only after the transport confirms it, so a failed
//! send stays retryable on the next pass. One failed item never stops the
//! rest of the batch.

use std::sync::Arc;
use std::time::Duration;

use huntbot_core::JobRecord;

use crate::formatter::format_job;
use crate::tracker::{DeliveryTracker, InMemoryDeliverySet};
use crate::traits::{ChannelId, DeliveryChannel, NotifyError};

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryResult {
    Sent,
    SkippedDuplicate,
    Failed(String),
}

/// Tally of a batch of delivery attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliverySummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DeliverySummary {
    pub fn record(&mut self, result: &DeliveryResult) {
        match result {
            DeliveryResult::Sent => self.sent += 1,
            DeliveryResult::SkippedDuplicate => self.skipped += 1,
            DeliveryResult::Failed(_) => self.failed += 1,
        }
    }
}

/// Sends job notifications, suppressing repeats.
pub struct Dispatcher {
    channel: Arc<dyn DeliveryChannel>,
    tracker: Box<dyn DeliveryTracker>,
    /// Pause between consecutive transport calls.
    pause: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with an empty in-memory delivery set.
    pub fn new(channel: Arc<dyn DeliveryChannel>, pause: Duration) -> Self {
        Self::with_tracker(channel, Box::new(InMemoryDeliverySet::new()), pause)
    }

    /// Create a dispatcher backed by a custom tracker.
    pub fn with_tracker(
        channel: Arc<dyn DeliveryChannel>,
        tracker: Box<dyn DeliveryTracker>,
        pause: Duration,
    ) -> Self {
        Self {
            channel,
            tracker,
            pause,
        }
    }

    pub fn tracker(&self) -> &dyn DeliveryTracker {
        self.tracker.as_ref()
    }

    /// Resolve the destination through the underlying channel.
    pub async fn resolve_channel(&self, name: &str) -> Result<ChannelId, NotifyError> {
        self.channel.resolve_channel(name).await
    }

    /// Deliver one job unless its delivery key was already sent.
    pub async fn deliver(&mut self, channel: &ChannelId, job: &JobRecord) -> DeliveryResult {
        let key = job.delivery_key();
        if self.tracker.contains(&key) {
            tracing::debug!(title = %job.title, company = %job.company, "skipping duplicate");
            return DeliveryResult::SkippedDuplicate;
        }

        let payload = format_job(job);
        let start = std::time::Instant::now();
        let result = self.channel.send(channel, &payload).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(ack) => {
                self.tracker.add(key);
                tracing::info!(
                    transport = self.channel.transport_name(),
                    title = %job.title,
                    company = %job.company,
                    network = job.is_network_post,
                    message_id = ?ack.message_id,
                    duration_ms,
                    "job posted"
                );
                DeliveryResult::Sent
            }
            Err(e) => {
                tracing::warn!(
                    transport = self.channel.transport_name(),
                    title = %job.title,
                    company = %job.company,
                    error = %e,
                    duration_ms,
                    "job delivery failed"
                );
                DeliveryResult::Failed(e.to_string())
            }
        }
    }

    /// Deliver every job in order, pausing between transport calls.
    ///
    /// Skipped duplicates do not trigger a pause.
    pub async fn deliver_all(&mut self, channel: &ChannelId, jobs: &[JobRecord]) -> DeliverySummary {
        let mut summary = DeliverySummary::default();
        let mut attempted = false;

        for job in jobs {
            if self.tracker.contains(&job.delivery_key()) {
                summary.record(&self.deliver(channel, job).await);
                continue;
            }
            if attempted && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
            attempted = true;
            summary.record(&self.deliver(channel, job).await);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::payload::NotificationPayload;
    use crate::traits::Ack;

    struct MockChannel {
        send_count: Arc<AtomicUsize>,
        /// Titles whose sends fail.
        fail_titles: Mutex<Vec<String>>,
    }

    impl MockChannel {
        fn new() -> Self {
            Self {
                send_count: Arc::new(AtomicUsize::new(0)),
                fail_titles: Mutex::new(Vec::new()),
            }
        }

        fn failing_for(titles: &[&str]) -> Self {
            let channel = Self::new();
            *channel.fail_titles.lock().unwrap() = titles.iter().map(|t| t.to_string()).collect();
            channel
        }

        fn recover(&self) {
            self.fail_titles.lock().unwrap().clear();
        }
    }

    #[async_trait::async_trait]
    impl DeliveryChannel for MockChannel {
        async fn resolve_channel(&self, name: &str) -> Result<ChannelId, NotifyError> {
            Ok(ChannelId(format!("C-{name}")))
        }

        async fn send(
            &self,
            _channel: &ChannelId,
            payload: &NotificationPayload,
        ) -> Result<Ack, NotifyError> {
            self.send_count.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .fail_titles
                .lock()
                .unwrap()
                .iter()
                .any(|t| payload.text.contains(t.as_str()));
            if failing {
                Err(NotifyError::Api("mock failure".to_string()))
            } else {
                Ok(Ack::default())
            }
        }

        fn transport_name(&self) -> &str {
            "mock"
        }
    }

    fn job(title: &str, location: &str) -> JobRecord {
        JobRecord::new(title, "Acme", location, "https://acme.test", "test")
    }

    fn channel_id() -> ChannelId {
        ChannelId("C1".into())
    }

    #[tokio::test]
    async fn first_delivery_is_sent_and_committed() {
        let channel = Arc::new(MockChannel::new());
        let mut dispatcher = Dispatcher::new(channel.clone(), Duration::ZERO);

        let result = dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;

        assert_eq!(result, DeliveryResult::Sent);
        assert_eq!(channel.send_count.load(Ordering::SeqCst), 1);
        assert!(dispatcher.tracker().contains(&job("PM", "Pune").delivery_key()));
    }

    #[tokio::test]
    async fn repeat_delivery_skipped_without_transport_call() {
        let channel = Arc::new(MockChannel::new());
        let mut dispatcher = Dispatcher::new(channel.clone(), Duration::ZERO);

        dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;
        let again = dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;

        assert_eq!(again, DeliveryResult::SkippedDuplicate);
        assert_eq!(channel.send_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn same_title_other_location_is_distinct() {
        let channel = Arc::new(MockChannel::new());
        let mut dispatcher = Dispatcher::new(channel.clone(), Duration::ZERO);

        dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;
        let other = dispatcher.deliver(&channel_id(), &job("PM", "Bangalore")).await;

        assert_eq!(other, DeliveryResult::Sent);
        assert_eq!(dispatcher.tracker().len(), 2);
    }

    #[tokio::test]
    async fn failed_delivery_is_not_committed_and_retries() {
        let channel = Arc::new(MockChannel::failing_for(&["PM"]));
        let mut dispatcher = Dispatcher::new(channel.clone(), Duration::ZERO);

        let first = dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;
        assert!(matches!(first, DeliveryResult::Failed(ref reason) if reason.contains("mock failure")));
        assert!(dispatcher.tracker().is_empty());

        channel.recover();
        let retry = dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;
        assert_eq!(retry, DeliveryResult::Sent);
        assert_eq!(channel.send_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn batch_failure_does_not_block_later_items() {
        let channel = Arc::new(MockChannel::failing_for(&["Broken"]));
        let mut dispatcher = Dispatcher::new(channel.clone(), Duration::ZERO);

        let jobs = vec![job("Broken", "Pune"), job("PM", "Pune"), job("PM", "Pune")];
        let summary = dispatcher.deliver_all(&channel_id(), &jobs).await;

        assert_eq!(
            summary,
            DeliverySummary {
                sent: 1,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(channel.send_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_only_between_transport_calls() {
        let channel = Arc::new(MockChannel::new());
        let mut dispatcher = Dispatcher::new(channel.clone(), Duration::from_secs(1));

        let jobs = vec![
            job("A", "Pune"),
            job("A", "Pune"),
            job("B", "Pune"),
            job("C", "Pune"),
        ];
        let start = tokio::time::Instant::now();
        let summary = dispatcher.deliver_all(&channel_id(), &jobs).await;

        assert_eq!(summary.sent, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn custom_tracker_is_consulted() {
        let mut seeded = InMemoryDeliverySet::new();
        seeded.add(job("PM", "Pune").delivery_key());
        let channel = Arc::new(MockChannel::new());
        let mut dispatcher =
            Dispatcher::with_tracker(channel.clone(), Box::new(seeded), Duration::ZERO);

        let result = dispatcher.deliver(&channel_id(), &job("PM", "Pune")).await;

        assert_eq!(result, DeliveryResult::SkippedDuplicate);
        assert_eq!(channel.send_count.load(Ordering::SeqCst), 0);
    }
}
