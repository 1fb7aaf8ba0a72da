//! Lazy, resumable enumerators over simple sources.
//!
//! An enumerator yields one item at a time; every yield is paired with the
//! cursor a future run would resume from (the position just completed).
//! Building the same enumerator twice from the same cursor must produce the
//! same remaining elements.

use crate::iteration::cursor::Cursor;
use crate::iteration::error::IterationError;

/// An item paired with the cursor that resumes immediately after it.
#[derive(Clone, Debug)]
pub struct CursorItem<T> {
    pub item: T,
    pub cursor: Cursor,
}

/// Pull-based lazy sequence, resumable from a cursor.
///
/// The runner depends on the single-pull-at-a-time contract: each
/// `next_item` call does at most one unit of fetch work, so the interruption
/// signal can be polled between items.
pub trait Enumerator<T>: Send {
    /// Produces the next item, or `None` when the sequence is exhausted.
    fn next_item(&mut self) -> Result<Option<CursorItem<T>>, IterationError>;
}

/// Counted repetition: `n` unit values. Cursor records the last completed
/// index; resuming skips everything up to and including it.
pub struct TimesEnumerator {
    total: u64,
    next_index: u64,
}

impl TimesEnumerator {
    pub fn new(total: u64, cursor: Option<&Cursor>) -> Result<Self, IterationError> {
        let next_index = match cursor {
            None => 0,
            Some(c) => {
                let done = c.as_index().ok_or_else(|| {
                    IterationError::Config(format!(
                        "counted repetition expects a positional cursor, got {:?}",
                        c
                    ))
                })?;
                done + 1
            }
        };
        Ok(Self { total, next_index })
    }
}

impl Enumerator<()> for TimesEnumerator {
    fn next_item(&mut self) -> Result<Option<CursorItem<()>>, IterationError> {
        if self.next_index >= self.total {
            return Ok(None);
        }
        let idx = self.next_index;
        self.next_index += 1;
        Ok(Some(CursorItem {
            item: (),
            cursor: Cursor::index(idx),
        }))
    }
}

/// Positional iteration over an owned ordered collection. Cursor is the index
/// of the last completed element.
///
/// A resume cursor that is not a single index, or that points past the end of
/// the collection, signals a programmer error and fails construction.
pub struct CollectionEnumerator<T> {
    remaining: std::vec::IntoIter<T>,
    next_index: u64,
}

impl<T> CollectionEnumerator<T> {
    pub fn new(items: Vec<T>, cursor: Option<&Cursor>) -> Result<Self, IterationError> {
        let start = match cursor {
            None => 0,
            Some(c) => {
                let done = c.as_index().ok_or_else(|| {
                    IterationError::Config(format!(
                        "collection iteration expects a positional cursor, got {:?}",
                        c
                    ))
                })?;
                done + 1
            }
        };
        if start as usize > items.len() {
            return Err(IterationError::Config(format!(
                "resume position {} is beyond the collection end ({} elements)",
                start,
                items.len()
            )));
        }
        let mut remaining = items.into_iter();
        for _ in 0..start {
            remaining.next();
        }
        Ok(Self {
            remaining,
            next_index: start,
        })
    }
}

impl<T: Send> Enumerator<T> for CollectionEnumerator<T> {
    fn next_item(&mut self) -> Result<Option<CursorItem<T>>, IterationError> {
        let item = match self.remaining.next() {
            Some(item) => item,
            None => return Ok(None),
        };
        let idx = self.next_index;
        self.next_index += 1;
        Ok(Some(CursorItem {
            item,
            cursor: Cursor::index(idx),
        }))
    }
}

/// Exactly one unit value, regardless of cursor. One-shot jobs use this to get
/// the lifecycle machinery without a real sequence.
pub struct OnceEnumerator {
    produced: bool,
}

impl OnceEnumerator {
    pub fn new() -> Self {
        Self { produced: false }
    }
}

impl Default for OnceEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Enumerator<()> for OnceEnumerator {
    fn next_item(&mut self) -> Result<Option<CursorItem<()>>, IterationError> {
        if self.produced {
            return Ok(None);
        }
        self.produced = true;
        Ok(Some(CursorItem {
            item: (),
            cursor: Cursor::index(0),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(e: &mut dyn Enumerator<T>) -> Vec<CursorItem<T>> {
        let mut out = Vec::new();
        while let Some(ci) = e.next_item().unwrap() {
            out.push(ci);
        }
        out
    }

    #[test]
    fn times_yields_n_units_with_index_cursors() {
        let mut e = TimesEnumerator::new(3, None).unwrap();
        let items = drain(&mut e);
        assert_eq!(items.len(), 3);
        let cursors: Vec<_> = items.iter().map(|ci| ci.cursor.clone()).collect();
        assert_eq!(
            cursors,
            vec![Cursor::index(0), Cursor::index(1), Cursor::index(2)]
        );
    }

    #[test]
    fn times_resumes_after_completed_index() {
        let mut e = TimesEnumerator::new(4, Some(&Cursor::index(1))).unwrap();
        let items = drain(&mut e);
        assert_eq!(items.len(), 2, "indices 2 and 3 remain");
        assert_eq!(items[0].cursor, Cursor::index(2));
    }

    #[test]
    fn times_rejects_non_positional_cursor() {
        let composite = Cursor::key([1i64, 2i64]);
        let err = TimesEnumerator::new(4, Some(&composite)).err().unwrap();
        assert!(matches!(err, IterationError::Config(_)));
    }

    #[test]
    fn collection_resumes_by_position() {
        let items = vec!["a", "b", "c", "d"];
        let mut e = CollectionEnumerator::new(items, Some(&Cursor::index(1))).unwrap();
        let rest = drain(&mut e);
        let values: Vec<_> = rest.iter().map(|ci| ci.item).collect();
        assert_eq!(values, vec!["c", "d"]);
        assert_eq!(rest[0].cursor, Cursor::index(2));
    }

    #[test]
    fn collection_rejects_cursor_beyond_end() {
        let err = CollectionEnumerator::new(vec![1, 2], Some(&Cursor::index(5)))
            .err()
            .unwrap();
        assert!(matches!(err, IterationError::Config(_)));
    }

    #[test]
    fn collection_same_cursor_same_remainder() {
        let build = || CollectionEnumerator::new(vec![10, 20, 30], Some(&Cursor::index(0))).unwrap();
        let first: Vec<_> = drain(&mut build()).into_iter().map(|ci| ci.item).collect();
        let second: Vec<_> = drain(&mut build()).into_iter().map(|ci| ci.item).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![20, 30]);
    }

    #[test]
    fn once_yields_exactly_one_unit_ignoring_cursor() {
        let mut e = OnceEnumerator::new();
        assert!(e.next_item().unwrap().is_some());
        assert!(e.next_item().unwrap().is_none());
    }
}
