//! Cursor-driven enumerators over a [RecordSource]: record-at-a-time and
//! batch-at-a-time scans.
//!
//! Both share one ordering contract: every pull fetches rows strictly greater
//! than the current cursor, so resuming from a committed cursor reproduces the
//! same remaining order. Sources that declare their own ordering or row limit
//! are rejected at construction.

use std::collections::VecDeque;

use crate::iteration::cursor::Cursor;
use crate::iteration::enumerator::{CursorItem, Enumerator};
use crate::iteration::error::IterationError;
use crate::iteration::records::{RecordSource, SourceDescriptor};

fn validate_source(descriptor: &SourceDescriptor) -> Result<(), IterationError> {
    if let Some(order) = &descriptor.imposed_order {
        return Err(IterationError::Config(format!(
            "source '{}' declares its own ordering ({}); the cursor owns the order of a scan",
            descriptor.name, order
        )));
    }
    if let Some(limit) = descriptor.imposed_limit {
        return Err(IterationError::Config(format!(
            "source '{}' declares its own row limit ({}); the scan's page size owns the limit",
            descriptor.name, limit
        )));
    }
    Ok(())
}

fn validate_page_size(descriptor: &SourceDescriptor, size: usize) -> Result<(), IterationError> {
    if size == 0 {
        return Err(IterationError::Config(format!(
            "page size for source '{}' must be at least 1",
            descriptor.name
        )));
    }
    Ok(())
}

/// Record-at-a-time scan: yields one row per pull, fetching pages of up to
/// `page_size` rows under the hood. Cursor after each yield is that row's
/// ordering-key tuple.
pub struct RecordEnumerator<S: RecordSource> {
    source: S,
    page_size: usize,
    cursor: Option<Cursor>,
    buffer: VecDeque<S::Record>,
    exhausted: bool,
}

impl<S: RecordSource> RecordEnumerator<S> {
    pub fn new(
        source: S,
        cursor: Option<Cursor>,
        page_size: usize,
    ) -> Result<Self, IterationError> {
        let descriptor = source.descriptor();
        validate_source(&descriptor)?;
        validate_page_size(&descriptor, page_size)?;
        Ok(Self {
            source,
            page_size,
            cursor,
            buffer: VecDeque::new(),
            exhausted: false,
        })
    }

    fn refill(&mut self) -> Result<(), IterationError> {
        let page = self.source.next_page(self.cursor.as_ref(), self.page_size)?;
        if page.len() < self.page_size {
            self.exhausted = true;
        }
        self.buffer.extend(page);
        Ok(())
    }
}

impl<S> Enumerator<S::Record> for RecordEnumerator<S>
where
    S: RecordSource + Send,
    S::Record: Send,
{
    fn next_item(&mut self) -> Result<Option<CursorItem<S::Record>>, IterationError> {
        if self.buffer.is_empty() {
            if self.exhausted {
                return Ok(None);
            }
            self.refill()?;
        }
        let record = match self.buffer.pop_front() {
            Some(record) => record,
            None => return Ok(None),
        };
        let cursor = self.source.key_of(&record);
        self.cursor = Some(cursor.clone());
        Ok(Some(CursorItem {
            item: record,
            cursor,
        }))
    }
}

/// Batch-at-a-time scan: each pull yields one ordered group of up to
/// `batch_size` rows as a single unit of work. Cursor after a batch is the key
/// of its last row.
pub struct BatchEnumerator<S: RecordSource> {
    source: S,
    batch_size: usize,
    cursor: Option<Cursor>,
    exhausted: bool,
}

impl<S: RecordSource> BatchEnumerator<S> {
    pub fn new(
        source: S,
        cursor: Option<Cursor>,
        batch_size: usize,
    ) -> Result<Self, IterationError> {
        let descriptor = source.descriptor();
        validate_source(&descriptor)?;
        validate_page_size(&descriptor, batch_size)?;
        Ok(Self {
            source,
            batch_size,
            cursor,
            exhausted: false,
        })
    }
}

impl<S> Enumerator<Vec<S::Record>> for BatchEnumerator<S>
where
    S: RecordSource + Send,
    S::Record: Send,
{
    fn next_item(&mut self) -> Result<Option<CursorItem<Vec<S::Record>>>, IterationError> {
        if self.exhausted {
            return Ok(None);
        }
        let batch = self.source.next_page(self.cursor.as_ref(), self.batch_size)?;
        if batch.len() < self.batch_size {
            self.exhausted = true;
        }
        let last = match batch.last() {
            Some(last) => last,
            None => return Ok(None),
        };
        let cursor = self.source.key_of(last);
        self.cursor = Some(cursor.clone());
        Ok(Some(CursorItem {
            item: batch,
            cursor,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iteration::records::InMemorySource;

    fn source(n: i64) -> InMemorySource<i64> {
        InMemorySource::new(
            SourceDescriptor::new("rows", vec!["id".into()]),
            (1..=n).collect(),
            |row| Cursor::key([*row]),
        )
    }

    fn drain<T>(e: &mut dyn Enumerator<T>) -> Vec<CursorItem<T>> {
        let mut out = Vec::new();
        while let Some(ci) = e.next_item().unwrap() {
            out.push(ci);
        }
        out
    }

    #[test]
    fn record_scan_yields_rows_in_key_order() {
        let mut e = RecordEnumerator::new(source(5), None, 2).unwrap();
        let items = drain(&mut e);
        let rows: Vec<_> = items.iter().map(|ci| ci.item).collect();
        assert_eq!(rows, vec![1, 2, 3, 4, 5]);
        assert_eq!(items[2].cursor, Cursor::key([3i64]));
    }

    #[test]
    fn record_scan_resumes_strictly_after_cursor() {
        let mut e = RecordEnumerator::new(source(5), Some(Cursor::key([3i64])), 2).unwrap();
        let rows: Vec<_> = drain(&mut e).into_iter().map(|ci| ci.item).collect();
        assert_eq!(rows, vec![4, 5]);
    }

    #[test]
    fn batch_scan_groups_rows_with_last_key_cursor() {
        let mut e = BatchEnumerator::new(source(10), None, 3).unwrap();
        let items = drain(&mut e);
        let sizes: Vec<_> = items.iter().map(|ci| ci.item.len()).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert_eq!(items[0].cursor, Cursor::key([3i64]));
        assert_eq!(items[3].cursor, Cursor::key([10i64]));
        let flattened: Vec<_> = items.into_iter().flat_map(|ci| ci.item).collect();
        assert_eq!(flattened, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn batch_scan_resumes_from_batch_cursor() {
        let mut e = BatchEnumerator::new(source(10), Some(Cursor::key([6i64])), 3).unwrap();
        let items = drain(&mut e);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item, vec![7, 8, 9]);
        assert_eq!(items[1].item, vec![10]);
    }

    #[test]
    fn ordered_source_is_rejected_at_construction() {
        let s = InMemorySource::new(
            SourceDescriptor::new("rows", vec!["id".into()]).with_imposed_order("id DESC"),
            vec![1i64, 2],
            |row| Cursor::key([*row]),
        );
        let err = RecordEnumerator::new(s, None, 10).err().unwrap();
        assert!(matches!(err, IterationError::Config(_)));
    }

    #[test]
    fn limited_source_is_rejected_at_construction() {
        let s = InMemorySource::new(
            SourceDescriptor::new("rows", vec!["id".into()]).with_imposed_limit(100),
            vec![1i64, 2],
            |row| Cursor::key([*row]),
        );
        let err = BatchEnumerator::new(s, None, 10).err().unwrap();
        assert!(matches!(err, IterationError::Config(_)));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = RecordEnumerator::new(source(3), None, 0).err().unwrap();
        assert!(matches!(err, IterationError::Config(_)));
    }

    #[test]
    fn exact_multiple_page_terminates_without_extra_fetch_rows() {
        // 6 rows, page size 3: second page is full, third fetch returns empty.
        let mut e = RecordEnumerator::new(source(6), None, 3).unwrap();
        let rows: Vec<_> = drain(&mut e).into_iter().map(|ci| ci.item).collect();
        assert_eq!(rows, vec![1, 2, 3, 4, 5, 6]);
    }
}
