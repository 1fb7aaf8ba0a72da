//! Record source boundary: keyset pagination over an externally stored,
//! ordered set of rows.
//!
//! The store is read-only from the kernel's perspective. A source hands back
//! the next ordered page whose keys are strictly greater than a lower bound;
//! the cursor *is* the ordering contract, so a source must not impose an
//! independent order or row limit of its own. That conflict is a configuration
//! error, surfaced when an enumerator is first constructed (see
//! [crate::iteration::record_scan]), never a runtime retry condition.

use crate::iteration::cursor::Cursor;
use crate::iteration::error::IterationError;

/// Describes a source for construction-time validation and error messages.
#[derive(Clone, Debug)]
pub struct SourceDescriptor {
    /// Human-readable source name (table, view, collection).
    pub name: String,
    /// Ordering-key columns, in key order. Default convention: primary key ascending.
    pub key_columns: Vec<String>,
    /// Set when the source declares its own ordering clause. Must be `None`.
    pub imposed_order: Option<String>,
    /// Set when the source declares its own row limit. Must be `None`.
    pub imposed_limit: Option<usize>,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, key_columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            key_columns,
            imposed_order: None,
            imposed_limit: None,
        }
    }

    pub fn with_imposed_order(mut self, order: impl Into<String>) -> Self {
        self.imposed_order = Some(order.into());
        self
    }

    pub fn with_imposed_limit(mut self, limit: usize) -> Self {
        self.imposed_limit = Some(limit);
        self
    }
}

/// Query capability over an external ordered record store.
///
/// **Constraints (must hold in all implementations):**
/// - `next_page(after, limit)` returns rows whose ordering key is strictly
///   greater than `after`, in ascending key order, at most `limit` rows.
/// - A page shorter than `limit` means the source is exhausted past it.
/// - `key_of` returns the row's ordering-key tuple in `key_columns` order.
///
/// The fetch is a synchronous external call; transient failures surface as
/// [IterationError::Source] and are the scheduler's retry concern.
pub trait RecordSource: Send + Sync {
    type Record;

    fn descriptor(&self) -> SourceDescriptor;

    fn key_of(&self, record: &Self::Record) -> Cursor;

    fn next_page(
        &self,
        after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<Self::Record>, IterationError>;
}

impl<S: RecordSource> RecordSource for std::sync::Arc<S> {
    type Record = S::Record;

    fn descriptor(&self) -> SourceDescriptor {
        (**self).descriptor()
    }

    fn key_of(&self, record: &Self::Record) -> Cursor {
        (**self).key_of(record)
    }

    fn next_page(
        &self,
        after: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<Self::Record>, IterationError> {
        (**self).next_page(after, limit)
    }
}

/// In-memory record source: rows kept sorted by key, paged by key bound.
/// Stands in for a real store in tests and examples.
pub struct InMemorySource<T> {
    descriptor: SourceDescriptor,
    rows: Vec<T>,
    key_fn: Box<dyn Fn(&T) -> Cursor + Send + Sync>,
}

impl<T: Clone + Send + Sync> InMemorySource<T> {
    pub fn new(
        descriptor: SourceDescriptor,
        mut rows: Vec<T>,
        key_fn: impl Fn(&T) -> Cursor + Send + Sync + 'static,
    ) -> Self {
        rows.sort_by(|a, b| key_fn(a).cmp(&key_fn(b)));
        Self {
            descriptor,
            rows,
            key_fn: Box::new(key_fn),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Clone + Send + Sync> RecordSource for InMemorySource<T> {
    type Record = T;

    fn descriptor(&self) -> SourceDescriptor {
        self.descriptor.clone()
    }

    fn key_of(&self, record: &T) -> Cursor {
        (self.key_fn)(record)
    }

    fn next_page(&self, after: Option<&Cursor>, limit: usize) -> Result<Vec<T>, IterationError> {
        let page = self
            .rows
            .iter()
            .filter(|row| match after {
                Some(bound) => (self.key_fn)(row) > *bound,
                None => true,
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(rows: Vec<i64>) -> InMemorySource<i64> {
        InMemorySource::new(
            SourceDescriptor::new("rows", vec!["id".into()]),
            rows,
            |row| Cursor::key([*row]),
        )
    }

    #[test]
    fn next_page_is_strictly_after_the_bound() {
        let s = source(vec![3, 1, 2, 5, 4]);
        let page = s.next_page(Some(&Cursor::key([2i64])), 2).unwrap();
        assert_eq!(page, vec![3, 4], "rows sort by key, bound is exclusive");
    }

    #[test]
    fn next_page_without_bound_starts_at_the_beginning() {
        let s = source(vec![2, 1]);
        let page = s.next_page(None, 10).unwrap();
        assert_eq!(page, vec![1, 2]);
    }
}
