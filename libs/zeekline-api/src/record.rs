use chrono::{DateTime, Utc};

use crate::tag::TagId;

/// Unit of data flowing through the ingest pipeline.
///
/// Processors rewrite records in place; they never create or drop them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Destination stream, as assigned by a `Tagger`.
    pub tag: TagId,
    /// Event time of the record.
    pub ts: DateTime<Utc>,
    /// Raw payload bytes — not necessarily UTF-8, not necessarily a single line.
    pub data: Vec<u8>,
}

impl Record {
    pub fn new(tag: TagId, ts: DateTime<Utc>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            ts,
            data: data.into(),
        }
    }
}
