//! Error type for the iteration kernel.
//!
//! Configuration errors are programmer mistakes: raised synchronously at
//! construction time and never retried. Callback and source errors propagate to
//! the scheduler's retry mechanism unchanged; the runner's only obligation is to
//! leave run state at the last successfully completed item's cursor first.

/// Kernel-level error type.
#[derive(Debug, thiserror::Error)]
pub enum IterationError {
    /// Programmer mistake (bad cursor shape, ordered/limited source, zero page size).
    /// Never retried.
    #[error("configuration error: {0}")]
    Config(String),
    /// External record source failed to produce a page. Retryable at the
    /// scheduler's discretion.
    #[error("record source error: {0}")]
    Source(String),
    /// The per-item callback failed. The committed cursor still points at the
    /// last successful item.
    #[error("iteration error: {0}")]
    Callback(String),
    /// A lifecycle hook failed; aborts the slice like a callback error.
    #[error("lifecycle hook error: {0}")]
    Hook(String),
    /// Continuation arguments could not be decoded.
    #[error("continuation error: {0}")]
    Continuation(String),
    /// Scheduler boundary failure (enqueue of a successor slice).
    #[error("queue error: {0}")]
    Queue(String),
}
