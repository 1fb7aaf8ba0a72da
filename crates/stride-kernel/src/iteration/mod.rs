//! Stride iteration kernel.
//!
//! Minimal complete set of interfaces: Cursor (ordered resume marker),
//! Enumerator (lazy, cursor-paired sequence), IterationRunner (drive one
//! slice), LifecycleHooks (start/complete/shutdown/per-item), Continuation
//! (state across slices). Jobs implement the two-method [job::IterativeJob]
//! capability; external stores implement [records::RecordSource].

pub mod continuation;
pub mod cursor;
pub mod enumerator;
pub mod error;
pub mod hooks;
pub mod job;
pub mod record_scan;
pub mod records;
pub mod run_state;
pub mod runner;
#[cfg(any(test, feature = "test-support"))]
pub mod stubs;

pub use continuation::Continuation;
pub use cursor::{Cursor, CursorValue};
pub use enumerator::{CollectionEnumerator, CursorItem, Enumerator, OnceEnumerator, TimesEnumerator};
pub use error::IterationError;
pub use hooks::{HookContext, LifecycleHooks};
pub use job::{IterativeJob, Params};
pub use record_scan::{BatchEnumerator, RecordEnumerator};
pub use records::{InMemorySource, RecordSource, SourceDescriptor};
pub use run_state::RunState;
pub use runner::{Control, IterationRunner, ShutdownCheck, SliceOutcome};
#[cfg(any(test, feature = "test-support"))]
pub use stubs::{CollectJob, HookCounters};
