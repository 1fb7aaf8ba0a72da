//! Runtime domain models for queue slices and diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Runtime-level status of one execution slice, for logs and diagnostics.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SliceStatus {
    Queued,
    Running,
    Yielded,
    Completed,
    Failed,
}

/// One scheduled execution slice as the queue carries it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueuedSlice {
    /// Logical job this slice belongs to.
    pub job_name: String,
    /// Encoded continuation arguments (see `stride_kernel::Continuation`).
    pub args: serde_json::Value,
    /// Scheduler-owned attempt counter, set at dequeue. Monotonic per logical
    /// job across continuations and retries; read-only for the kernel.
    pub executions: u32,
    pub enqueued_at: DateTime<Utc>,
}

/// Summary of a drained logical-job chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Slices executed, successful or not.
    pub slices: u32,
    /// Failed slices that were re-enqueued with their original arguments.
    pub retries: u32,
}
