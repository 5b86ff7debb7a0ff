//! Search result models: scored spans, per-record results, and the
//! progressive two-phase result envelope.

use crate::models::RecordRef;
use serde::{Deserialize, Serialize};

/// A scored match span within a string.
///
/// `start` and `length` are byte offsets into the text the span was
/// extracted from, with `start + length` always on a char boundary of
/// that text. Spans produced by one extraction call are sorted ascending
/// by start after overlap merging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMatch {
    /// Byte offset of the first matched byte
    pub start: usize,

    /// Length of the span in bytes (always > 0)
    pub length: usize,

    /// Match quality, 0.0–1.0 (1.0 = exact)
    pub score: f64,
}

impl TextMatch {
    pub fn new(start: usize, length: usize, score: f64) -> Self {
        Self {
            start,
            length,
            score,
        }
    }

    /// Exclusive end offset of the span.
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// A record scored against one query, with the spans that matched inside
/// its content. Created fresh per search call and never persisted.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched record
    pub record: RecordRef,

    /// Relevance score, 0.0–1.0 (1.0 = best)
    pub score: f64,

    /// Match spans within the record's content, sorted ascending by start
    pub matches: Vec<TextMatch>,
}

impl SearchResult {
    pub fn new(record: RecordRef, score: f64, matches: Vec<TextMatch>) -> Self {
        Self {
            record,
            score,
            matches,
        }
    }
}

/// Which pass of the progressive protocol produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    /// Fast exact pass over all records
    Exact,
    /// Slower hybrid pass over records the exact pass missed
    Enhanced,
}

/// Result of one progressive search phase.
///
/// Phase 1 produces an `Exact` result whose `needs_enhancement` flag
/// tells the caller whether running phase 2 is worthwhile; phase 2
/// supersedes it with a terminal `Enhanced` result.
#[derive(Debug, Clone)]
pub struct ProgressiveSearchResult {
    /// The pass that produced this result set
    pub phase: SearchPhase,

    /// Matched records, sorted descending by score
    pub results: Vec<SearchResult>,

    /// True when no further pass will improve this result set
    pub is_complete: bool,

    /// True when the caller should invoke the enhancement pass
    pub needs_enhancement: bool,
}
