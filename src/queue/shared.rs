//! Lock-guarded handle to a single work-order queue.
//!
//! Every operation, reads included, holds the mutex for its whole
//! sort-mutate-return sequence, so callers never observe a half-sorted queue.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use super::entry::WorkOrder;
use super::ranked::WorkOrderQueue;
use super::QueueError;

/// Cheaply cloneable handle shared between request handlers.
#[derive(Debug, Clone, Default)]
pub struct SharedQueue {
    inner: Arc<Mutex<WorkOrderQueue>>,
}

impl SharedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: WorkOrder) -> Result<(), QueueError> {
        self.inner.lock().await.insert(order)
    }

    pub async fn remove_top(&self) -> Option<WorkOrder> {
        self.inner.lock().await.remove_top()
    }

    pub async fn remove(&self, id: i64) -> Result<WorkOrder, QueueError> {
        self.inner.lock().await.remove(id)
    }

    pub async fn position_of(&self, id: i64) -> Option<usize> {
        self.inner.lock().await.position_of(id)
    }

    pub async fn list_ids(&self) -> Vec<i64> {
        self.inner.lock().await.list_ids()
    }

    pub async fn average_wait_time(&self) -> f64 {
        self.inner.lock().await.average_wait_time()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.inner.lock().await.contains(id)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Drop every queued order.
    pub async fn reset(&self) {
        let mut queue = self.inner.lock().await;
        let dropped = queue.len();
        queue.clear();
        info!(dropped, "work-order queue reset");
    }
}
