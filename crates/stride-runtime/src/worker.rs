//! Worker: the framework-owned execution entry point for iterative jobs.
//!
//! One slice = decode continuation → rebuild the enumerator from the committed
//! cursor → drive the runner → on yield, encode and enqueue the successor.
//! The job type only supplies the two capability methods
//! (`build_enumerator`, `each_iteration`); it cannot override this entry point.
//!
//! Retry contract: a failed slice is re-enqueued with the exact arguments it
//! was dequeued with, so the retry resumes from the same committed cursor and
//! re-attempts only the items after it. When attempts are exhausted the error
//! surfaces to the caller; no completion or shutdown hooks fire on that path.

use tracing::{info, warn};

use stride_kernel::{
    Continuation, IterationError, IterationRunner, IterativeJob, Params, SliceOutcome,
};

use crate::models::{DrainReport, QueuedSlice, SliceStatus};
use crate::queue::{InMemoryQueue, JobQueue};

/// How many times one slice may be attempted before its error surfaces.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // One attempt: no retries unless the caller opts in.
        Self { max_attempts: 1 }
    }
}

/// Executes slices of one logical job type.
pub struct Worker<J: IterativeJob> {
    job_name: String,
    job: J,
    runner: IterationRunner,
    retry: RetryPolicy,
}

impl<J: IterativeJob> Worker<J> {
    pub fn new(job_name: impl Into<String>, job: J, runner: IterationRunner) -> Self {
        Self {
            job_name: job_name.into(),
            job,
            runner,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// Schedules the first slice of a fresh logical job.
    pub fn enqueue_first(&self, queue: &dyn JobQueue, params: Params) -> Result<(), IterationError> {
        let args = Continuation::first_run(params).encode()?;
        queue.enqueue(&self.job_name, args)
    }

    /// Runs one dequeued slice. On `Yielded` the successor slice is already
    /// enqueued when this returns. On `Err` nothing has been enqueued; the
    /// caller decides whether to retry with the same arguments.
    pub fn run_slice(
        &self,
        slice: &QueuedSlice,
        queue: &dyn JobQueue,
    ) -> Result<SliceOutcome, IterationError> {
        let continuation = Continuation::decode(&slice.args)?;
        let mut state = continuation.to_state(slice.executions);
        info!(
            job = %self.job_name,
            executions = slice.executions,
            times_interrupted = state.times_interrupted,
            status = ?SliceStatus::Running,
            "slice started"
        );
        let outcome = self.runner.run_slice(&self.job, &continuation.params, &mut state)?;
        match outcome {
            SliceOutcome::Yielded => {
                let successor = Continuation::from_state(&state, continuation.params).encode()?;
                queue.enqueue(&self.job_name, successor)?;
                info!(
                    job = %self.job_name,
                    times_interrupted = state.times_interrupted,
                    status = ?SliceStatus::Yielded,
                    "slice yielded; continuation enqueued"
                );
            }
            SliceOutcome::Completed => {
                info!(
                    job = %self.job_name,
                    times_interrupted = state.times_interrupted,
                    status = ?SliceStatus::Completed,
                    "logical job completed"
                );
            }
        }
        Ok(outcome)
    }

    /// Drains the queue until it is empty, retrying failed slices with their
    /// original arguments up to the policy's attempt budget. Test and example
    /// harness for the slice-at-a-time loop a real scheduler would drive.
    pub fn drain(&self, queue: &InMemoryQueue) -> Result<DrainReport, IterationError> {
        let mut report = DrainReport::default();
        let mut attempts_for_current = 0u32;
        while let Some(slice) = queue.dequeue() {
            report.slices += 1;
            attempts_for_current += 1;
            match self.run_slice(&slice, queue) {
                Ok(_) => attempts_for_current = 0,
                Err(e) => {
                    if attempts_for_current >= self.retry.max_attempts {
                        warn!(
                            job = %self.job_name,
                            attempts = attempts_for_current,
                            status = ?SliceStatus::Failed,
                            error = %e,
                            "slice failed; attempts exhausted"
                        );
                        return Err(e);
                    }
                    report.retries += 1;
                    warn!(
                        job = %self.job_name,
                        attempts = attempts_for_current,
                        status = ?SliceStatus::Failed,
                        error = %e,
                        "slice failed; retrying with the same arguments"
                    );
                    queue.enqueue(&slice.job_name, slice.args.clone())?;
                }
            }
        }
        Ok(report)
    }
}
