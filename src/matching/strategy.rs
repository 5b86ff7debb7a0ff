//! The matching strategy capability interface.

use crate::models::{Record, TextMatch};

/// A matching strategy: a pure function family over (record, query).
///
/// Implementations hold no per-call mutable state, so a strategy instance
/// is safe to share across threads and concurrent search calls.
pub trait SearchStrategy: Send + Sync {
    /// Human-readable strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Relevance of `record` for `query`, 0.0-1.0 (1.0 = best).
    fn calculate_score(&self, record: &Record, query: &str) -> f64;

    /// Match spans of `query` within `text`, sorted ascending by start
    /// and non-overlapping.
    fn get_matches(&self, text: &str, query: &str) -> Vec<TextMatch>;

    /// Score a record must exceed for `matches` to accept it.
    fn minimum_score_threshold(&self) -> f64;

    /// Whether `record` is relevant for `query`. A blank query matches
    /// everything.
    fn matches(&self, record: &Record, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        self.calculate_score(record, query) > self.minimum_score_threshold()
    }
}
