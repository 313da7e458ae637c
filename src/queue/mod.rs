//! Work-order ranking engine: entries, the ranked queue, and its shared
//! lock-guarded handle.

pub mod entry;
pub mod ranked;
pub mod shared;

pub use self::entry::{Tier, WorkOrder, WorkOrderResponse};
pub use self::ranked::WorkOrderQueue;
pub use self::shared::SharedQueue;

use thiserror::Error;

/// Why a queue operation was rejected. None of these leave the queue
/// modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("invalid id {id}: ids must be positive")]
    InvalidIdentifier { id: i64 },

    #[error("order {id} is already queued")]
    DuplicateIdentifier { id: i64 },

    #[error("order {id} is not queued")]
    NotFound { id: i64 },
}
