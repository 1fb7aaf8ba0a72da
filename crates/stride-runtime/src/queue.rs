//! Scheduler boundary and the in-memory queue used by tests and examples.
//!
//! The kernel requires only `enqueue`; everything else (durability, retry
//! backoff, delivery guarantees) belongs to the external scheduler. The
//! in-memory queue is FIFO and at-least-once shaped: dequeuing does not
//! acknowledge, callers may legitimately re-enqueue the same arguments.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::Utc;

use stride_kernel::IterationError;

use crate::models::QueuedSlice;

/// Enqueue capability the worker uses to schedule continuation slices.
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, job_name: &str, args: serde_json::Value) -> Result<(), IterationError>;
}

/// FIFO in-memory queue. Maintains the per-logical-job `executions` counter
/// the way a real scheduler would: incremented at every dequeue, whether the
/// slice is a continuation or a retry.
pub struct InMemoryQueue {
    slices: Mutex<VecDeque<QueuedSlice>>,
    executions: Mutex<HashMap<String, u32>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self {
            slices: Mutex::new(VecDeque::new()),
            executions: Mutex::new(HashMap::new()),
        }
    }

    /// Pops the next slice, stamping it with the incremented attempt counter.
    pub fn dequeue(&self) -> Option<QueuedSlice> {
        let mut slices = self.slices.lock().expect("queue lock");
        let mut slice = slices.pop_front()?;
        let mut executions = self.executions.lock().expect("executions lock");
        let counter = executions.entry(slice.job_name.clone()).or_insert(0);
        *counter += 1;
        slice.executions = *counter;
        Some(slice)
    }

    /// Next queued slice without dequeuing it (diagnostics and tests).
    pub fn peek(&self) -> Option<QueuedSlice> {
        self.slices.lock().expect("queue lock").front().cloned()
    }

    pub fn len(&self) -> usize {
        self.slices.lock().expect("queue lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl JobQueue for InMemoryQueue {
    fn enqueue(&self, job_name: &str, args: serde_json::Value) -> Result<(), IterationError> {
        let mut slices = self.slices.lock().expect("queue lock");
        slices.push_back(QueuedSlice {
            job_name: job_name.to_string(),
            args,
            executions: 0,
            enqueued_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dequeue_preserves_fifo_order() {
        let queue = InMemoryQueue::new();
        queue.enqueue("scan", json!({"n": 1})).unwrap();
        queue.enqueue("scan", json!({"n": 2})).unwrap();
        assert_eq!(queue.dequeue().unwrap().args, json!({"n": 1}));
        assert_eq!(queue.dequeue().unwrap().args, json!({"n": 2}));
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn executions_counts_every_dequeue_per_job() {
        let queue = InMemoryQueue::new();
        queue.enqueue("scan", json!(null)).unwrap();
        queue.enqueue("other", json!(null)).unwrap();
        queue.enqueue("scan", json!(null)).unwrap();
        assert_eq!(queue.dequeue().unwrap().executions, 1);
        assert_eq!(queue.dequeue().unwrap().executions, 1, "counters are per job");
        assert_eq!(queue.dequeue().unwrap().executions, 2);
    }

    #[test]
    fn redelivered_arguments_bump_the_counter_again() {
        let queue = InMemoryQueue::new();
        queue.enqueue("scan", json!({"cursor_position": [3]})).unwrap();
        let first = queue.dequeue().unwrap();
        // Scheduler-style retry: same arguments, new attempt.
        queue.enqueue(&first.job_name, first.args.clone()).unwrap();
        let second = queue.dequeue().unwrap();
        assert_eq!(second.args, first.args);
        assert_eq!(second.executions, first.executions + 1);
    }
}
