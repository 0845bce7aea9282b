use serde::{Deserialize, Serialize};

/// One record of tracked time, extracted from a single table row.
///
/// Field order matters: the serialized form (and therefore every report
/// line) lists date, duration, tags, note.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeEntry {
    /// Calendar date, taken from the source document's name with any
    /// trailing `.md` removed. One document, one date.
    pub date: String,
    /// Tracked hours, possibly fractional. Always finite and non-negative;
    /// rows that fail this are rejected at extraction time.
    pub duration: f64,
    /// Space-separated labels from the source row, in row order.
    /// Duplicates are kept.
    pub tags: Vec<String>,
    /// Free-text description, may be empty.
    pub note: String,
}
