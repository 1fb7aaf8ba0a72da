//! Cursor: ordered, serializable marker of the last completed position in a source.
//!
//! A cursor is a tuple of scalar values (the ordering key of the last successfully
//! processed item). Cursors from the same source are totally ordered and must
//! increase monotonically across successful iterations of one logical job.
//! Serialization is an ordered JSON list of primitives, so a composite key like
//! `(updated_at, id)` round-trips with its field order intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scalar component of a cursor.
///
/// Variants deserialize untagged (number, then RFC 3339 string, then plain string),
/// so the wire form stays a primitive. Constraint: a text key column must not emit
/// RFC 3339-shaped strings, or they would round-trip as timestamps.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    Int(i64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl From<i64> for CursorValue {
    fn from(v: i64) -> Self {
        CursorValue::Int(v)
    }
}

impl From<DateTime<Utc>> for CursorValue {
    fn from(v: DateTime<Utc>) -> Self {
        CursorValue::Timestamp(v)
    }
}

impl From<&str> for CursorValue {
    fn from(v: &str) -> Self {
        CursorValue::Text(v.to_string())
    }
}

impl From<String> for CursorValue {
    fn from(v: String) -> Self {
        CursorValue::Text(v)
    }
}

/// Ordered tuple of scalar values identifying a position in a data source.
///
/// Ordering is lexicographic over the components. `Option<Cursor>::None` is the
/// "not yet started" sentinel everywhere in this crate.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cursor(pub Vec<CursorValue>);

impl Cursor {
    /// Single-component positional cursor (counted repetition, fixed collections).
    pub fn index(i: u64) -> Self {
        Cursor(vec![CursorValue::Int(i as i64)])
    }

    /// Composite cursor from ordering-key components, in key order.
    pub fn key<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<CursorValue>,
    {
        Cursor(values.into_iter().map(Into::into).collect())
    }

    /// Reads the cursor back as a positional index, if it is a single
    /// non-negative integer. Positional builders use this for resumption.
    pub fn as_index(&self) -> Option<u64> {
        match self.0.as_slice() {
            [CursorValue::Int(i)] if *i >= 0 => Some(*i as u64),
            _ => None,
        }
    }

    pub fn values(&self) -> &[CursorValue] {
        &self.0
    }
}
