//! Scan 10 rows of an in-memory "table" with a budget of 3 items per slice.
//!
//! Run with: `cargo run --example interruptible_scan`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use stride_kernel::{
    Control, Cursor, Enumerator, InMemorySource, IterationError, IterationRunner, IterativeJob,
    LifecycleHooks, Params, RecordEnumerator, ShutdownCheck, SourceDescriptor,
};
use stride_runtime::{InMemoryQueue, Worker};

struct AuditScanJob {
    source: Arc<InMemorySource<i64>>,
    processed: Arc<Mutex<Vec<i64>>>,
}

impl IterativeJob for AuditScanJob {
    type Item = i64;

    fn build_enumerator(
        &self,
        _params: &Params,
        cursor: Option<Cursor>,
    ) -> Result<Box<dyn Enumerator<i64>>, IterationError> {
        Ok(Box::new(RecordEnumerator::new(
            Arc::clone(&self.source),
            cursor,
            4,
        )?))
    }

    fn each_iteration(&self, row: i64, params: &Params) -> Result<Control, IterationError> {
        tracing::info!(row, tenant = %params["tenant"], "auditing row");
        self.processed.lock().expect("processed lock").push(row);
        Ok(Control::Continue)
    }
}

fn main() -> Result<(), IterationError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let source = Arc::new(InMemorySource::new(
        SourceDescriptor::new("audit_rows", vec!["id".into()]),
        (1..=10).collect(),
        |row| Cursor::key([*row]),
    ));
    let processed = Arc::new(Mutex::new(Vec::new()));

    // Stand-in for a wall-clock budget: stop after every 3rd processed item.
    let budget = AtomicUsize::new(0);
    let shutdown: ShutdownCheck =
        Box::new(move || budget.fetch_add(1, Ordering::SeqCst) % 3 == 2);

    let hooks = LifecycleHooks::new()
        .on_start(|_| {
            tracing::info!("logical job starting");
            Ok(())
        })
        .on_complete(|ctx| {
            tracing::info!(interruptions = ctx.times_interrupted, "logical job complete");
            Ok(())
        })
        .on_shutdown(|ctx| {
            tracing::info!(cursor = ?ctx.cursor_position, "slice teardown");
            Ok(())
        });

    let worker = Worker::new(
        "audit-scan",
        AuditScanJob {
            source,
            processed: Arc::clone(&processed),
        },
        IterationRunner::new(hooks, shutdown),
    );

    let queue = InMemoryQueue::new();
    worker.enqueue_first(&queue, json!({"tenant": "acme"}))?;
    let report = worker.drain(&queue)?;

    tracing::info!(
        slices = report.slices,
        rows = processed.lock().expect("processed lock").len(),
        "done"
    );
    Ok(())
}
