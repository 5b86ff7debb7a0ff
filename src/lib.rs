//! Recall Search - the matching and ranking engine behind an in-memory
//! history search box.
//!
//! Given a snapshot of history records and a user query, the engine
//! returns a relevance-ordered subset quickly, then optionally refines it
//! with more expensive matching without blocking the caller.
//!
//! # Architecture
//!
//! - **models**: records, match spans, and result envelopes
//! - **config**: scoring thresholds shared read-only by all strategies
//! - **error**: custom error types for precise error handling
//! - **matching**: the four strategies (exact, fuzzy, word-token, hybrid),
//!   the similarity primitives they score with, and the overlap merger
//! - **search**: the single-shot orchestrator and the progressive
//!   two-phase coordinator

pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod search;

pub use config::SearchConfig;
pub use error::{ConfigError, EngineResult, SearchError};
pub use matching::{
    merge_overlapping, ExactStrategy, FuzzyStrategy, HybridStrategy, SearchStrategy,
    WordTokenStrategy,
};
pub use models::{
    ProgressiveSearchResult, Record, RecordRef, SearchPhase, SearchResult, TextMatch,
};
pub use search::{ProgressiveSearch, SearchEngine, PHASE_TRANSITION_DELAY};
