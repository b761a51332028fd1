//! Record of delivery keys already sent.
//!
//! The default [`InMemoryDeliverySet`] lives as long as the process and starts
//! empty on every restart. A durable store can be swapped in behind
//! [`DeliveryTracker`] without touching the dispatcher.

use std::collections::HashSet;

use huntbot_core::DeliveryKey;

/// Append-only set of delivered identities.
pub trait DeliveryTracker: Send + Sync {
    fn contains(&self, key: &DeliveryKey) -> bool;

    /// Record a confirmed delivery.
    fn add(&mut self, key: DeliveryKey);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime delivery set.
#[derive(Debug, Default)]
pub struct InMemoryDeliverySet {
    keys: HashSet<DeliveryKey>,
}

impl InMemoryDeliverySet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeliveryTracker for InMemoryDeliverySet {
    fn contains(&self, key: &DeliveryKey) -> bool {
        self.keys.contains(key)
    }

    fn add(&mut self, key: DeliveryKey) {
        self.keys.insert(key);
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
