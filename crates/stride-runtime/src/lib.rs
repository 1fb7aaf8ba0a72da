//! # stride-runtime
//!
//! Framework glue around the stride iteration kernel: the scheduler boundary
//! ([queue::JobQueue]), an in-memory at-least-once queue for tests and
//! examples, and the [worker::Worker] entry point that wires the continuation
//! protocol and the runner together, slice by slice.
//!
//! A real deployment replaces [queue::InMemoryQueue] with its own scheduler
//! behind the same `enqueue` boundary; the worker's slice contract (retry with
//! identical arguments, successor enqueued before a yield returns) is what the
//! kernel's at-least-once safety relies on.

pub mod models;
pub mod queue;
pub mod worker;

pub use models::{DrainReport, QueuedSlice, SliceStatus};
pub use queue::{InMemoryQueue, JobQueue};
pub use worker::{RetryPolicy, Worker};
