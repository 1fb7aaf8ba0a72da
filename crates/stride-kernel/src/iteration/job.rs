//! Job capability interface: the two methods an iterative job must provide.
//!
//! The execution entry point itself (slice decode, runner drive, continuation
//! enqueue) is framework-provided in the runtime crate and is not part of this
//! surface, so implementers cannot override it.

use crate::iteration::cursor::Cursor;
use crate::iteration::enumerator::Enumerator;
use crate::iteration::error::IterationError;
use crate::iteration::runner::Control;

/// Caller-supplied argument bundle, passed unchanged to every iteration of a
/// logical job. The kernel never touches it; it must survive every resumption
/// bit-for-bit.
pub type Params = serde_json::Value;

/// A logical job executed as a sequence of resumable slices.
///
/// `build_enumerator` must be re-enterable: called with the same cursor it must
/// produce the same remaining elements. Returning `Box<dyn Enumerator>` is what
/// discharges the lazy-sequence contract at compile time; an eagerly
/// materialized collection can only enter the runner by being wrapped in an
/// enumerator that restores the single-pull-at-a-time behavior.
pub trait IterativeJob: Send + Sync {
    type Item;

    /// Builds the lazy sequence for this job, seeded with the committed cursor
    /// (`None` on the first slice).
    fn build_enumerator(
        &self,
        params: &Params,
        cursor: Option<Cursor>,
    ) -> Result<Box<dyn Enumerator<Self::Item>>, IterationError>;

    /// Processes one item. Return [Control::Abort] to stop early and complete
    /// gracefully; errors propagate to the scheduler's retry mechanism.
    fn each_iteration(&self, item: Self::Item, params: &Params)
        -> Result<Control, IterationError>;
}
