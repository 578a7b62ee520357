// ── Alert log ──

use std::collections::VecDeque;

use tokio::sync::RwLock;

use crate::model::Alert;

/// Alerts retained when no capacity is configured.
pub const DEFAULT_ALERT_CAPACITY: usize = 20;

/// Bounded, newest-first log of alerts. Overflow drops the oldest entry
/// silently.
#[derive(Debug)]
pub struct AlertLog {
    entries: RwLock<VecDeque<Alert>>,
    capacity: usize,
}

impl AlertLog {
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub async fn push(&self, alert: Alert) {
        let mut entries = self.entries.write().await;
        entries.push_front(alert);
        entries.truncate(self.capacity);
    }

    /// Newest first.
    pub async fn list(&self) -> Vec<Alert> {
        self.entries.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}
