//! Per-slice run state: committed cursor, interruption count, attempt count.
//!
//! Lifecycle: created fresh on the very first slice; restored verbatim when a
//! continuation is dequeued; committed once per slice at the moment the runner
//! yields or terminates normally; never persisted on unrecovered failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::iteration::cursor::Cursor;

/// State handed from one execution slice to the next.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunState {
    /// Last committed cursor; `None` means "not yet started".
    pub cursor_position: Option<Cursor>,
    /// Count of slices that completed and yielded for this logical job.
    pub times_interrupted: u32,
    /// Scheduler-level attempt counter. Owned and incremented by the external
    /// scheduler; read-only here, surfaced to hooks for diagnostics.
    #[serde(default)]
    pub executions: u32,
    /// Slice start time, for elapsed-time bookkeeping in hooks. Not persisted.
    #[serde(skip)]
    pub started_at: Option<DateTime<Utc>>,
}

impl RunState {
    /// Fresh state for a logical job's first slice.
    pub fn fresh() -> Self {
        Self::default()
    }

    /// True only on the very first slice of a logical job: nothing committed,
    /// never interrupted.
    pub fn is_first_slice(&self) -> bool {
        self.cursor_position.is_none() && self.times_interrupted == 0
    }

    /// Time elapsed in the current slice, if it has started.
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.started_at.map(|t| Utc::now() - t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_first_slice() {
        assert!(RunState::fresh().is_first_slice());
    }

    #[test]
    fn interrupted_state_is_not_first_even_without_cursor() {
        // A slice can yield before committing any cursor only in theory, but
        // the interruption count alone must keep on_start from re-firing.
        let state = RunState {
            times_interrupted: 1,
            ..RunState::fresh()
        };
        assert!(!state.is_first_slice());
    }

    #[test]
    fn state_with_cursor_is_not_first_slice() {
        let state = RunState {
            cursor_position: Some(Cursor::index(0)),
            ..RunState::fresh()
        };
        assert!(!state.is_first_slice());
    }
}
