//! Continuation protocol: run state + parameters to and from the scheduler's
//! argument representation.
//!
//! The encoded record carries the committed cursor (an ordered list of
//! primitives), the interruption count, and the untouched caller parameters.
//! The scheduler-level attempt counter is *not* part of the record: the
//! scheduler owns and increments it, and hands it back read-only at dequeue.

use serde::{Deserialize, Serialize};

use crate::iteration::cursor::Cursor;
use crate::iteration::error::IterationError;
use crate::iteration::job::Params;
use crate::iteration::run_state::RunState;

/// Serialized description of where a logical job resumes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Continuation {
    /// Last committed cursor; absent on a first run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_position: Option<Cursor>,
    /// Completed-and-yielded slice count for the logical job.
    #[serde(default)]
    pub times_interrupted: u32,
    /// Caller parameters, passed through bit-for-bit.
    #[serde(default)]
    pub params: Params,
}

impl Continuation {
    /// Fresh arguments for a logical job's first slice.
    pub fn first_run(params: Params) -> Self {
        Self {
            cursor_position: None,
            times_interrupted: 0,
            params,
        }
    }

    /// Successor arguments carrying a yielded slice's committed state.
    pub fn from_state(state: &RunState, params: Params) -> Self {
        Self {
            cursor_position: state.cursor_position.clone(),
            times_interrupted: state.times_interrupted,
            params,
        }
    }

    /// Encodes into the scheduler's native argument value.
    pub fn encode(&self) -> Result<serde_json::Value, IterationError> {
        serde_json::to_value(self).map_err(|e| IterationError::Continuation(e.to_string()))
    }

    /// Decodes dequeued arguments. `Null` means "no prior state": a first run
    /// with empty parameters. Present state is used exactly as persisted.
    pub fn decode(args: &serde_json::Value) -> Result<Self, IterationError> {
        if args.is_null() {
            return Ok(Self::first_run(Params::Null));
        }
        serde_json::from_value(args.clone())
            .map_err(|e| IterationError::Continuation(e.to_string()))
    }

    /// Rebuilds run state for this slice. `executions` comes from the
    /// scheduler's own counter, never from the encoded record.
    pub fn to_state(&self, executions: u32) -> RunState {
        RunState {
            cursor_position: self.cursor_position.clone(),
            times_interrupted: self.times_interrupted,
            executions,
            started_at: None,
        }
    }
}
