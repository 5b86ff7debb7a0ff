//! Data models for history records and search results.
//!
//! This module contains the data structures the engine consumes (records)
//! and produces (match spans, scored results, progressive result sets).

pub mod record;
pub mod result;

pub use record::{Record, RecordRef};
pub use result::{ProgressiveSearchResult, SearchPhase, SearchResult, TextMatch};
