//! Push outcome tracking

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::models::PushStats;

/// Shared counters of push outcomes
#[derive(Debug, Clone, Default)]
pub struct PushTracker {
    stats: Arc<RwLock<PushStats>>,
}

impl PushTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_delivered(&self) {
        let mut stats = self.stats.write().await;
        stats.delivered += 1;
        stats.last_delivered = Some(chrono::Utc::now());
        debug!("Delivered pushes: {}", stats.delivered);
    }

    pub async fn record_superseded(&self) {
        self.stats.write().await.superseded += 1;
    }

    pub async fn record_failed(&self) {
        self.stats.write().await.failed += 1;
    }

    /// Get current statistics
    pub async fn snapshot(&self) -> PushStats {
        self.stats.read().await.clone()
    }
}
