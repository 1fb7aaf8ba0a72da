//! Test stubs shared by kernel unit tests and runtime integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::iteration::cursor::Cursor;
use crate::iteration::enumerator::{CollectionEnumerator, Enumerator};
use crate::iteration::error::IterationError;
use crate::iteration::hooks::LifecycleHooks;
use crate::iteration::job::{IterativeJob, Params};
use crate::iteration::runner::Control;

/// Job over a fixed list of integers that records every processed value.
/// Optionally fails on a specific value or aborts after N items.
pub struct CollectJob {
    rows: Vec<i64>,
    seen: Arc<Mutex<Vec<i64>>>,
    fail_on: Option<i64>,
    abort_after: Option<usize>,
}

impl CollectJob {
    pub fn over(rows: Vec<i64>) -> Self {
        Self {
            rows,
            seen: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
            abort_after: None,
        }
    }

    /// Fail the iteration that receives this value.
    pub fn fail_on(mut self, value: i64) -> Self {
        self.fail_on = Some(value);
        self
    }

    /// Return [Control::Abort] once this many items have been processed.
    pub fn abort_after(mut self, count: usize) -> Self {
        self.abort_after = Some(count);
        self
    }

    /// Values processed so far, in order.
    pub fn seen(&self) -> Vec<i64> {
        self.seen.lock().expect("seen lock").clone()
    }

    /// Shared handle to the processed-value log (for jobs moved into workers).
    pub fn seen_handle(&self) -> Arc<Mutex<Vec<i64>>> {
        Arc::clone(&self.seen)
    }
}

impl IterativeJob for CollectJob {
    type Item = i64;

    fn build_enumerator(
        &self,
        _params: &Params,
        cursor: Option<Cursor>,
    ) -> Result<Box<dyn Enumerator<i64>>, IterationError> {
        Ok(Box::new(CollectionEnumerator::new(
            self.rows.clone(),
            cursor.as_ref(),
        )?))
    }

    fn each_iteration(&self, item: i64, _params: &Params) -> Result<Control, IterationError> {
        if self.fail_on == Some(item) {
            return Err(IterationError::Callback(format!(
                "instructed to fail on {item}"
            )));
        }
        let mut seen = self.seen.lock().expect("seen lock");
        seen.push(item);
        if let Some(limit) = self.abort_after {
            if seen.len() >= limit {
                return Ok(Control::Abort);
            }
        }
        Ok(Control::Continue)
    }
}

/// Shared hook-fire counters; `hooks()` builds a dispatcher wired to them, so
/// counts accumulate across slices and runner instances.
#[derive(Clone, Default)]
pub struct HookCounters {
    starts: Arc<AtomicUsize>,
    completes: Arc<AtomicUsize>,
    shutdowns: Arc<AtomicUsize>,
    items: Arc<AtomicUsize>,
}

impl HookCounters {
    pub fn hooks(&self) -> LifecycleHooks {
        let starts = Arc::clone(&self.starts);
        let completes = Arc::clone(&self.completes);
        let shutdowns = Arc::clone(&self.shutdowns);
        let items = Arc::clone(&self.items);
        LifecycleHooks::new()
            .on_start(move |_| {
                starts.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .on_complete(move |_| {
                completes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .on_shutdown(move |_| {
                shutdowns.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .after_item(move |_| {
                items.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn completes(&self) -> usize {
        self.completes.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> usize {
        self.items.load(Ordering::SeqCst)
    }
}
