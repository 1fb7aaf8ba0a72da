//! # stride-kernel
//!
//! Resumable cursor-based iteration engine: run a long batch of work as a
//! sequence of short, independently-schedulable execution slices, each
//! checkpointed by a cursor.
//!
//! A logical job iterates a data source (counted repetition, in-memory
//! collection, or a multi-million-row external store) far larger than one
//! scheduler-visible execution budget. The kernel turns the source into a
//! lazy, cursor-paired sequence, drives it one item at a time, polls a
//! "should I stop now" predicate between items, and on yield hands back run
//! state ready to be serialized into a continuation slice. Progress recorded
//! in the cursor is monotonic and safe to resume from under at-least-once
//! redelivery: a retried slice starts from the last committed cursor, so no
//! item is processed twice relative to it and no item is skipped.
//!
//! The job scheduler and the record store are external collaborators; this
//! crate specifies only their boundary (`JobQueue` lives in the runtime crate,
//! [iteration::records::RecordSource] here).

pub mod iteration;

pub use iteration::{
    BatchEnumerator, CollectionEnumerator, Continuation, Control, Cursor, CursorItem, CursorValue,
    Enumerator, HookContext, InMemorySource, IterationError, IterationRunner, IterativeJob,
    LifecycleHooks, OnceEnumerator, Params, RecordEnumerator, RecordSource, RunState,
    ShutdownCheck, SliceOutcome, SourceDescriptor, TimesEnumerator,
};
