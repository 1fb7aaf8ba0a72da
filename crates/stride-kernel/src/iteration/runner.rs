//! Iteration runner: drives one lazy sequence for one execution slice.
//!
//! State machine per logical job:
//! `NotStarted → Running → { Yielded, Completed, Failed }`.
//! `Yielded` is re-entered as `Running` when the continuation slice is
//! dequeued; `Completed` and unrecovered `Failed` are terminal.
//!
//! The runner pre-fetches the item after the one just processed, so it knows
//! whether more work remains before polling the shutdown check. Yielding
//! therefore never schedules an empty continuation slice: a slice that
//! processes the last item completes on the spot.

use crate::iteration::error::IterationError;
use crate::iteration::hooks::{HookContext, LifecycleHooks};
use crate::iteration::job::{IterativeJob, Params};
use crate::iteration::run_state::RunState;

/// Per-item callback result: keep going, or stop early and complete
/// gracefully. Abort is a control value, not an error; it never reaches the
/// retry mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Abort,
}

/// How a slice ended. Failure is the `Err` side of `run_slice`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliceOutcome {
    /// Sequence exhausted or aborted; completion hooks fired, no continuation.
    Completed,
    /// Interruption requested with work remaining; caller must persist the run
    /// state and enqueue a continuation slice.
    Yielded,
}

/// "Should I stop now" predicate, polled once per processed item. Must be fast
/// and non-blocking; whether it consults a wall-clock budget or an external
/// supervisor signal is the caller's business.
pub type ShutdownCheck = Box<dyn Fn() -> bool + Send + Sync>;

/// Drives one slice of a logical job: pulls items, invokes the job callback,
/// maintains run-state invariants, and decides continue-vs-yield-vs-stop.
pub struct IterationRunner {
    hooks: LifecycleHooks,
    shutdown: ShutdownCheck,
}

impl IterationRunner {
    pub fn new(hooks: LifecycleHooks, shutdown: ShutdownCheck) -> Self {
        Self { hooks, shutdown }
    }

    /// Runner that never interrupts: the whole sequence runs in one slice.
    pub fn uninterruptible(hooks: LifecycleHooks) -> Self {
        Self::new(hooks, Box::new(|| false))
    }

    /// Runs one slice. On `Ok(Yielded)`, `state` holds the committed cursor and
    /// the incremented interruption count, ready to be encoded into a
    /// continuation. On `Err`, `state.cursor_position` still points at the last
    /// *successfully completed* item, so a scheduler-level retry with the prior
    /// arguments resumes exactly one cursor-step past the last success.
    pub fn run_slice<J: IterativeJob + ?Sized>(
        &self,
        job: &J,
        params: &Params,
        state: &mut RunState,
    ) -> Result<SliceOutcome, IterationError> {
        if state.started_at.is_none() {
            state.started_at = Some(chrono::Utc::now());
        }
        let first_slice = state.is_first_slice();
        let mut enumerator = job.build_enumerator(params, state.cursor_position.clone())?;
        if first_slice {
            self.hooks.fire_start(&HookContext::from_state(state))?;
        }

        let mut pending = enumerator.next_item()?;
        loop {
            let current = match pending.take() {
                Some(item) => item,
                None => return self.complete(state),
            };
            match job.each_iteration(current.item, params)? {
                Control::Continue => {}
                Control::Abort => return self.complete(state),
            }
            state.cursor_position = Some(current.cursor);
            self.hooks.fire_after_item(&HookContext::from_state(state))?;

            pending = enumerator.next_item()?;
            if pending.is_none() {
                return self.complete(state);
            }
            if (self.shutdown)() {
                state.times_interrupted += 1;
                self.hooks.fire_shutdown(&HookContext::from_state(state))?;
                return Ok(SliceOutcome::Yielded);
            }
        }
    }

    fn complete(&self, state: &RunState) -> Result<SliceOutcome, IterationError> {
        let ctx = HookContext::from_state(state);
        self.hooks.fire_complete(&ctx)?;
        self.hooks.fire_shutdown(&ctx)?;
        Ok(SliceOutcome::Completed)
    }
}
