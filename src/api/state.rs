use crate::queue::SharedQueue;

#[derive(Clone)]
pub struct AppState {
    pub queue: SharedQueue,
}

impl AppState {
    /// State for a router serving `queue`.
    pub fn new(queue: SharedQueue) -> Self {
        Self { queue }
    }
}
