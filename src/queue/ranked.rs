//! The ranked queue.
//!
//! Orders are kept in a `Vec` sorted by descending rank. Because rank drifts
//! with time, the vector is re-sorted on every mutation and read operations
//! derive their order afresh at the instant they are called. Each sort
//! evaluates every rank against a single captured instant so the comparator
//! stays consistent for the duration of the sort.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::entry::WorkOrder;
use super::QueueError;

/// Work orders ordered from highest to lowest rank.
#[derive(Debug, Default)]
pub struct WorkOrderQueue {
    orders: Vec<WorkOrder>,
}

impl WorkOrderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.orders.iter().any(|o| o.id() == id)
    }

    /// Add an order unless its id is non-positive or already queued.
    pub fn insert(&mut self, order: WorkOrder) -> Result<(), QueueError> {
        let id = order.id();
        if id < 1 {
            return Err(QueueError::InvalidIdentifier { id });
        }
        if self.contains(id) {
            return Err(QueueError::DuplicateIdentifier { id });
        }

        self.orders.push(order);
        self.sort_at(Utc::now());
        debug!(id, queued = self.orders.len(), "order enqueued");
        Ok(())
    }

    /// Remove and return the highest-ranked order, or `None` when empty.
    pub fn remove_top(&mut self) -> Option<WorkOrder> {
        if self.orders.is_empty() {
            return None;
        }

        // Sorting at the removal instant leaves the remainder sorted too.
        self.sort_at(Utc::now());
        let order = self.orders.remove(0);
        debug!(id = order.id(), queued = self.orders.len(), "top order dequeued");
        Some(order)
    }

    /// Remove the order with the given id.
    pub fn remove(&mut self, id: i64) -> Result<WorkOrder, QueueError> {
        if id < 1 {
            return Err(QueueError::InvalidIdentifier { id });
        }
        let index = self
            .orders
            .iter()
            .position(|o| o.id() == id)
            .ok_or(QueueError::NotFound { id })?;

        let order = self.orders.remove(index);
        self.sort_at(Utc::now());
        debug!(id, queued = self.orders.len(), "order removed");
        Ok(order)
    }

    /// Zero-based position of an order as ranked right now.
    pub fn position_of(&self, id: i64) -> Option<usize> {
        self.ranked_at(Utc::now())
            .iter()
            .position(|o| o.id() == id)
    }

    /// Ids from highest to lowest rank as of now.
    pub fn list_ids(&self) -> Vec<i64> {
        self.ranked_at(Utc::now())
            .iter()
            .map(|o| o.id())
            .collect()
    }

    /// Mean wait time in seconds across all orders, `0.0` when empty.
    pub fn average_wait_time(&self) -> f64 {
        if self.orders.is_empty() {
            return 0.0;
        }
        let now = Utc::now();
        let total: f64 = self.orders.iter().map(|o| o.wait_time_at(now)).sum();
        total / self.orders.len() as f64
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    fn sort_at(&mut self, now: DateTime<Utc>) {
        self.orders.sort_by(|a, b| b.cmp_at(a, now));
    }

    fn ranked_at(&self, now: DateTime<Utc>) -> Vec<&WorkOrder> {
        let mut ranked: Vec<&WorkOrder> = self.orders.iter().collect();
        ranked.sort_by(|a, b| b.cmp_at(a, now));
        ranked
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
